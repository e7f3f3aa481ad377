use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
    storage::PUBLIC_PREFIX,
};

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod dashboard;
pub mod doc;
pub mod farmer_products;
pub mod farms;
pub mod health;
pub mod pages;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/catalog", catalog::router())
        .nest("/cart", cart::router())
        .nest("/farms", farms::router())
        .nest("/farmer-products", farmer_products::router())
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
}

/// Every route of the service with state bound. Server layers are added by the binary.
pub fn create_app(state: AppState) -> Router {
    let storage = ServeDir::new(state.storage.root());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(pages::router(state.clone()))
        .merge(chat::router())
        .nest_service(PUBLIC_PREFIX, storage)
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
