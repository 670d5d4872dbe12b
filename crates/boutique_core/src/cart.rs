use crate::{Product, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("invalid quantity {0}: must be at least 1")]
    InvalidQuantity(i64),
    #[error("quantity for product {product_id} would exceed {max}")]
    QuantityOverflow { product_id: ProductId, max: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Aggregate returned by every cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartSummary {
    pub total_items: u64,
    pub total_price: f64,
}

/// Shopping cart: one item per product id, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.position(product_id).map(|idx| self.items[idx].quantity)
    }

    pub fn add_one(&mut self, product: Product) -> Result<CartSummary, CartError> {
        self.add_to_cart(product, 1)
    }

    /// Adds `quantity` units, appending a new item or incrementing the existing one.
    pub fn add_to_cart(
        &mut self,
        product: Product,
        quantity: i64,
    ) -> Result<CartSummary, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let overflow = CartError::QuantityOverflow {
            product_id: product.id,
            max: u32::MAX,
        };
        let quantity = u32::try_from(quantity).map_err(|_| overflow.clone())?;

        match self.position(product.id) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.quantity = item.quantity.checked_add(quantity).ok_or(overflow)?;
            }
            None => self.items.push(CartItem { product, quantity }),
        }
        Ok(self.summary())
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> CartSummary {
        self.items.retain(|item| item.product.id != product_id);
        self.summary()
    }

    /// Sets an absolute quantity; zero or below removes the item.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartSummary, CartError> {
        if quantity <= 0 {
            return Ok(self.remove_from_cart(product_id));
        }
        let Some(idx) = self.position(product_id) else {
            return Ok(self.summary());
        };
        self.items[idx].quantity =
            u32::try_from(quantity).map_err(|_| CartError::QuantityOverflow {
                product_id,
                max: u32::MAX,
            })?;
        Ok(self.summary())
    }

    pub fn clear_cart(&mut self) -> CartSummary {
        self.items.clear();
        self.summary()
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            total_items: self.total_items(),
            total_price: self.total_price(),
        }
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product.id == product_id)
    }
}
