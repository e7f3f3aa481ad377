use axum::{
    Json, Router,
    extract::{Path, Query},
    routing::get,
};

use crate::{
    catalog::{self, CatalogProduct, CatalogQuery},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
};

pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive name search"),
        ("category" = Option<String>, Query, description = "fruits, vegetables or organic")
    ),
    responses(
        (status = 200, description = "Catalog products", body = ApiResponse<Vec<CatalogProduct>>)
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    Query(query): Query<CatalogQuery>,
) -> Json<ApiResponse<Vec<CatalogProduct>>> {
    let items: Vec<CatalogProduct> = catalog::search(&query).into_iter().cloned().collect();
    let meta = Meta::all(items.len());
    Json(ApiResponse::success("Products", items, Some(meta)))
}

#[utoipa::path(
    get,
    path = "/api/catalog/{id}",
    params(
        ("id" = u32, Path, description = "Catalog product ID")
    ),
    responses(
        (status = 200, description = "Catalog product", body = ApiResponse<CatalogProduct>),
        (status = 404, description = "Product not found")
    ),
    tag = "Catalog"
)]
pub async fn get_product(Path(id): Path<u32>) -> AppResult<Json<ApiResponse<CatalogProduct>>> {
    let product = catalog::find(id).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("Product", product, None)))
}
