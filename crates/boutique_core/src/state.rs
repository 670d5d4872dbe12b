use crate::view_model::{AppViewModel, CartLineView, DetailView, ProductRowView};
use crate::{Cart, Favorites, Product, ProductId, ProductList};

/// Detail screen for a single product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product_id: ProductId,
    pub product: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub quantity: u32,
}

impl ProductDetail {
    pub(crate) fn opening(product_id: ProductId) -> Self {
        Self {
            product_id,
            product: None,
            loading: true,
            error: None,
            quantity: 1,
        }
    }
}

/// Whole-application state. Owns the list pipeline and the cart and favorites
/// stores; the host constructs it once and threads it through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    list: ProductList,
    categories: Vec<String>,
    detail: Option<ProductDetail>,
    cart: Cart,
    favorites: Favorites,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self::with_stores(ProductList::new(page_size), Cart::new(), Favorites::new())
    }

    pub fn with_stores(list: ProductList, cart: Cart, favorites: Favorites) -> Self {
        Self {
            list,
            cart,
            favorites,
            ..Self::default()
        }
    }

    pub fn list(&self) -> &ProductList {
        &self.list
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn detail(&self) -> Option<&ProductDetail> {
        self.detail.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let row = |product: &Product| ProductRowView {
            product_id: product.id,
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price,
            rate: product.rating.rate,
            is_favorite: self.favorites.is_favorite(product.id),
            in_cart: self.cart.quantity_of(product.id),
        };

        AppViewModel {
            category: self.list.category().label().to_string(),
            categories: self.categories.clone(),
            search: self.list.search().to_string(),
            sort: self.list.sort(),
            page: self.list.page(),
            products: self.list.displayed().iter().map(row).collect(),
            accumulated_count: self.list.products().len(),
            full_screen_loading: self.list.shows_full_screen_loader(),
            refreshing: self.list.is_refreshing(),
            loading_more: self.list.is_loading_more(),
            error: self.list.error().map(ToOwned::to_owned),
            detail: self.detail.as_ref().map(|detail| DetailView {
                product_id: detail.product_id,
                product: detail.product.clone(),
                loading: detail.loading,
                error: detail.error.clone(),
                quantity: detail.quantity,
                is_favorite: self.favorites.is_favorite(detail.product_id),
            }),
            cart_lines: self
                .cart
                .items()
                .iter()
                .map(|item| CartLineView {
                    product_id: item.product.id,
                    title: item.product.title.clone(),
                    unit_price: item.product.price,
                    quantity: item.quantity,
                    line_total: item.line_total(),
                })
                .collect(),
            cart_total_items: self.cart.total_items(),
            cart_total_price: self.cart.total_price(),
            favorites: self.favorites.products().iter().map(row).collect(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn list_mut(&mut self) -> &mut ProductList {
        &mut self.list
    }

    pub(crate) fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub(crate) fn favorites_mut(&mut self) -> &mut Favorites {
        &mut self.favorites
    }

    pub(crate) fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    pub(crate) fn detail_mut(&mut self) -> Option<&mut ProductDetail> {
        self.detail.as_mut()
    }

    pub(crate) fn set_detail(&mut self, detail: Option<ProductDetail>) {
        self.detail = detail;
    }

    pub(crate) fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    /// Looks a product up among everything the state currently holds.
    pub(crate) fn find_product(&self, product_id: ProductId) -> Option<&Product> {
        self.list
            .products()
            .iter()
            .chain(self.detail.iter().filter_map(|detail| detail.product.as_ref()))
            .chain(self.favorites.products())
            .chain(self.cart.items().iter().map(|item| &item.product))
            .find(|product| product.id == product_id)
    }
}
