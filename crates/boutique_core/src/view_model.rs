use crate::{Product, ProductId, SortMode};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub category: String,
    pub categories: Vec<String>,
    pub search: String,
    pub sort: SortMode,
    pub page: u32,
    /// Accumulated products after search and sort.
    pub products: Vec<ProductRowView>,
    pub accumulated_count: usize,
    pub full_screen_loading: bool,
    pub refreshing: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    pub detail: Option<DetailView>,
    pub cart_lines: Vec<CartLineView>,
    pub cart_total_items: u64,
    pub cart_total_price: f64,
    pub favorites: Vec<ProductRowView>,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRowView {
    pub product_id: ProductId,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub rate: f64,
    pub is_favorite: bool,
    pub in_cart: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub product_id: ProductId,
    pub product: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub quantity: u32,
    pub is_favorite: bool,
}
