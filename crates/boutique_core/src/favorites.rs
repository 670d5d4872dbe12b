use crate::{Product, ProductId};

/// Favorite products, unique by id, in the order they were added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Favorites {
    products: Vec<Product>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns `false` when the product was already a favorite.
    pub fn add_favorite(&mut self, product: Product) -> bool {
        if self.is_favorite(product.id) {
            return false;
        }
        self.products.push(product);
        true
    }

    /// Returns `true` when something was removed.
    pub fn remove_favorite(&mut self, product_id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|product| product.id != product_id);
        self.products.len() != before
    }

    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.products.iter().any(|product| product.id == product_id)
    }

    /// Flips membership and returns whether the product is now a favorite.
    pub fn toggle_favorite(&mut self, product: Product) -> bool {
        if self.remove_favorite(product.id) {
            false
        } else {
            self.products.push(product);
            true
        }
    }
}
