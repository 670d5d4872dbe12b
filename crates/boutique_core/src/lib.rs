//! Boutique core: product model, cart and favorites stores, the product list
//! pipeline, and the pure application state machine driving them.
mod cart;
mod effect;
mod favorites;
mod msg;
mod product;
mod product_list;
mod state;
mod update;
mod view_model;

pub use cart::{Cart, CartError, CartItem, CartSummary};
pub use effect::Effect;
pub use favorites::Favorites;
pub use msg::Msg;
pub use product::{CategoryFilter, Product, ProductId, Rating, ALL_CATEGORIES};
pub use product_list::{
    apply_view, LoadError, PageKind, PageRequest, ProductList, SortMode, DEFAULT_PAGE_SIZE,
};
pub use state::{AppState, ProductDetail};
pub use update::{update, CART_EMPTY, CHECKOUT_UNAVAILABLE};
pub use view_model::{AppViewModel, CartLineView, DetailView, ProductRowView};
