use boutique_logging::{boutique_debug, boutique_info, boutique_warn};

use crate::state::ProductDetail;
use crate::{AppState, CartError, CartSummary, Effect, Msg, ProductId};

pub const CHECKOUT_UNAVAILABLE: &str = "Checkout is not available yet";
pub const CART_EMPTY: &str = "Your cart is empty";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let request = state.list_mut().load_initial();
            state.mark_dirty();
            vec![Effect::FetchCategories, Effect::FetchPage(request)]
        }
        Msg::CategorySelected(category) => {
            if *state.list().category() == category {
                return (state, Vec::new());
            }
            boutique_info!("Category changed to {}", category);
            let request = state.list_mut().set_category(category);
            state.mark_dirty();
            vec![Effect::FetchPage(request)]
        }
        Msg::SearchChanged(text) => {
            if state.list().search() != text {
                state.list_mut().set_search(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SortChanged(sort) => {
            if state.list().sort() != sort {
                state.list_mut().set_sort(sort);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LoadMoreRequested => match state.list_mut().load_more() {
            Some(request) => {
                state.mark_dirty();
                vec![Effect::FetchPage(request)]
            }
            None => Vec::new(),
        },
        Msg::RefreshRequested => {
            let request = state.list_mut().refresh();
            state.mark_dirty();
            vec![Effect::FetchPage(request)]
        }
        Msg::RetryRequested => {
            let request = state.list_mut().load_initial();
            state.mark_dirty();
            vec![Effect::FetchPage(request)]
        }
        Msg::CategoriesLoaded(result) => {
            match result {
                Ok(categories) => {
                    state.set_categories(categories);
                    state.mark_dirty();
                }
                Err(err) => boutique_warn!("Loading categories failed: {}", err),
            }
            Vec::new()
        }
        Msg::PageLoaded { request, result } => {
            if state.list_mut().apply_page(&request, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ProductOpened(product_id) => {
            state.set_detail(Some(ProductDetail::opening(product_id)));
            state.mark_dirty();
            vec![Effect::FetchProduct { product_id }]
        }
        Msg::ProductClosed => {
            if state.detail().is_some() {
                state.set_detail(None);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ProductLoaded { product_id, result } => {
            let Some(detail) = state
                .detail_mut()
                .filter(|detail| detail.product_id == product_id)
            else {
                boutique_debug!("Discarding product {} for a closed detail view", product_id);
                return (state, Vec::new());
            };
            detail.loading = false;
            match result {
                Ok(product) => {
                    detail.product = Some(product);
                    detail.error = None;
                }
                Err(err) => {
                    boutique_warn!("Loading product {} failed: {}", product_id, err);
                    detail.error = Some(format!("Unable to load product: {err}"));
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::DetailQuantityChanged(quantity) => {
            if let Some(detail) = state.detail_mut() {
                detail.quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AddDetailToCart => {
            let selection = state
                .detail()
                .and_then(|detail| detail.product.clone().map(|p| (p, detail.quantity)));
            if let Some((product, quantity)) = selection {
                let title = product.title.clone();
                let result = state.cart_mut().add_to_cart(product, i64::from(quantity));
                if apply_cart_result(&mut state, result) {
                    state.set_notice(Some(format!("{title} x{quantity} added to cart")));
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AddToCart {
            product_id,
            quantity,
        } => {
            match state.find_product(product_id).cloned() {
                Some(product) => {
                    let result = state.cart_mut().add_to_cart(product, quantity);
                    apply_cart_result(&mut state, result);
                }
                None => notify_unknown(&mut state, product_id),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::CartQuantityChanged {
            product_id,
            quantity,
        } => {
            let result = state.cart_mut().update_quantity(product_id, quantity);
            apply_cart_result(&mut state, result);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CartItemIncremented(product_id) => {
            step_quantity(&mut state, product_id, 1);
            Vec::new()
        }
        Msg::CartItemDecremented(product_id) => {
            step_quantity(&mut state, product_id, -1);
            Vec::new()
        }
        Msg::RemoveFromCart(product_id) => {
            state.cart_mut().remove_from_cart(product_id);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ClearCart => {
            state.cart_mut().clear_cart();
            state.mark_dirty();
            Vec::new()
        }
        Msg::CheckoutRequested => {
            let notice = if state.cart().is_empty() {
                CART_EMPTY
            } else {
                CHECKOUT_UNAVAILABLE
            };
            state.set_notice(Some(notice.to_string()));
            state.mark_dirty();
            Vec::new()
        }
        Msg::FavoriteToggled(product_id) => {
            match state.find_product(product_id).cloned() {
                Some(product) => {
                    let now_favorite = state.favorites_mut().toggle_favorite(product);
                    boutique_debug!("Product {} favorite={}", product_id, now_favorite);
                }
                None => notify_unknown(&mut state, product_id),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::RemoveFavorite(product_id) => {
            if state.favorites_mut().remove_favorite(product_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoticeDismissed => {
            if state.notice().is_some() {
                state.set_notice(None);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn step_quantity(state: &mut AppState, product_id: ProductId, delta: i64) {
    let Some(current) = state.cart().quantity_of(product_id) else {
        return;
    };
    let result = state
        .cart_mut()
        .update_quantity(product_id, i64::from(current) + delta);
    apply_cart_result(state, result);
    state.mark_dirty();
}

/// Surfaces a rejected cart operation as a notice. Returns whether it succeeded.
fn apply_cart_result(state: &mut AppState, result: Result<CartSummary, CartError>) -> bool {
    match result {
        Ok(summary) => {
            boutique_debug!(
                "Cart now holds {} items, total {:.2}",
                summary.total_items,
                summary.total_price
            );
            true
        }
        Err(err) => {
            boutique_warn!("Cart operation rejected: {}", err);
            state.set_notice(Some(err.to_string()));
            false
        }
    }
}

fn notify_unknown(state: &mut AppState, product_id: ProductId) {
    boutique_warn!("Product {} is not loaded", product_id);
    state.set_notice(Some(format!("Product {product_id} is not available")));
}
