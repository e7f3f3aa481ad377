use chrono::Utc;
use uuid::Uuid;

use crate::{
    cart::Cart,
    catalog,
    dto::cart::{CartView, CheckoutRequest, Receipt, UpdateCartRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    pricing::{price_lines, summarize_cart},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn view_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let cart = state.carts.get(user.user_id).await;
    Ok(ApiResponse::success("OK", cart_view(&cart), Some(Meta::empty())))
}

pub async fn update_cart(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.delta == 0 {
        return Err(AppError::BadRequest("delta must not be 0".into()));
    }
    if catalog::find(payload.item_id).is_none() {
        return Err(AppError::BadRequest("product not found".to_string()));
    }

    let cart = state
        .carts
        .update(user.user_id, payload.item_id, payload.delta)
        .await;
    tracing::debug!(
        user_id = %user.user_id,
        item_id = payload.item_id,
        delta = payload.delta,
        quantity = cart.quantity_of(payload.item_id),
        "cart updated"
    );
    Ok(ApiResponse::success("OK", cart_view(&cart), Some(Meta::empty())))
}

/// Removes an item's whole line by applying its negated quantity.
pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    item_id: u32,
) -> AppResult<ApiResponse<CartView>> {
    let cart = state
        .carts
        .remove(user.user_id, item_id)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Removed from cart",
        cart_view(&cart),
        Some(Meta::empty()),
    ))
}

/// Places the order: bills the cart with the chosen payment method and empties it.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<Receipt>> {
    let payment_method = payload
        .payment_method
        .ok_or_else(|| AppError::BadRequest("payment method is required".into()))?;

    let cart = state.carts.take(user.user_id).await;
    let summary =
        summarize_cart(&cart).ok_or_else(|| AppError::BadRequest("Cart is empty".into()))?;

    let receipt = Receipt {
        reference: build_reference(Uuid::new_v4()),
        payment_method,
        lines: price_lines(&cart),
        summary,
    };
    tracing::info!(
        user_id = %user.user_id,
        reference = %receipt.reference,
        total = receipt.summary.total,
        "order placed"
    );
    Ok(ApiResponse::success(
        "Order placed",
        receipt,
        Some(Meta::empty()),
    ))
}

pub fn cart_view(cart: &Cart) -> CartView {
    CartView {
        lines: price_lines(cart),
        item_count: cart.item_count(),
        summary: summarize_cart(cart),
    }
}

fn build_reference(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = order_id.simple().to_string();
    format!("INV-{}-{}", date, &suffix[..8])
}
