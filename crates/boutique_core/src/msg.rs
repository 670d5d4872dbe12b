use crate::{CategoryFilter, LoadError, PageRequest, Product, ProductId, SortMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Application started: load categories and the first page.
    Started,
    /// User picked a category chip (`All` clears the filter).
    CategorySelected(CategoryFilter),
    /// User edited the search box.
    SearchChanged(String),
    /// User picked a sort option.
    SortChanged(SortMode),
    /// List scrolled near its end.
    LoadMoreRequested,
    /// Pull-to-refresh.
    RefreshRequested,
    /// User asked to retry after a failed first page.
    RetryRequested,
    /// Catalog answered the category request.
    CategoriesLoaded(Result<Vec<String>, LoadError>),
    /// Catalog answered a page request.
    PageLoaded {
        request: PageRequest,
        result: Result<Vec<Product>, LoadError>,
    },
    /// User opened a product detail view.
    ProductOpened(ProductId),
    /// User left the detail view.
    ProductClosed,
    /// Catalog answered a single-product request.
    ProductLoaded {
        product_id: ProductId,
        result: Result<Product, LoadError>,
    },
    /// Quantity selector on the detail view; clamped to at least 1.
    DetailQuantityChanged(i64),
    /// "Add to cart" on the detail view, using the selected quantity.
    AddDetailToCart,
    /// Add a known product to the cart.
    AddToCart { product_id: ProductId, quantity: i64 },
    /// Absolute quantity from the cart screen; zero or below removes.
    CartQuantityChanged { product_id: ProductId, quantity: i64 },
    CartItemIncremented(ProductId),
    CartItemDecremented(ProductId),
    RemoveFromCart(ProductId),
    ClearCart,
    /// Checkout button; ordering is not available.
    CheckoutRequested,
    FavoriteToggled(ProductId),
    RemoveFavorite(ProductId),
    NoticeDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
