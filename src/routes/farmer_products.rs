use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        farmer_products::{FarmerProductList, ProductInput},
        farms::UploadQuery,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::FarmerProduct,
    response::ApiResponse,
    services::farmer_product_service,
    state::AppState,
    storage::UploadedObject,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", put(update_product).delete(delete_product))
        .route("/images", post(upload_product_image))
}

#[utoipa::path(
    get,
    path = "/api/farmer-products",
    responses(
        (status = 200, description = "Caller's listings, newest first", body = ApiResponse<FarmerProductList>),
        (status = 403, description = "Not a farmer")
    ),
    security(("bearer_auth" = [])),
    tag = "Farmer Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FarmerProductList>>> {
    let resp = farmer_product_service::list_products(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/farmer-products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Listing created", body = ApiResponse<FarmerProduct>),
        (status = 400, description = "Invalid listing")
    ),
    security(("bearer_auth" = [])),
    tag = "Farmer Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProductInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<FarmerProduct>>)> {
    let resp = farmer_product_service::create_product(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/farmer-products/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Listing updated", body = ApiResponse<FarmerProduct>),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Farmer Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductInput>,
) -> AppResult<Json<ApiResponse<FarmerProduct>>> {
    let resp = farmer_product_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/farmer-products/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Listing deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Farmer Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = farmer_product_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/farmer-products/images",
    params(
        ("file_name" = String, Query, description = "Original file name; its extension is kept")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Stored in product_images", body = ApiResponse<UploadedObject>),
        (status = 400, description = "Empty file")
    ),
    security(("bearer_auth" = [])),
    tag = "Farmer Products"
)]
pub async fn upload_product_image(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadedObject>>)> {
    let resp =
        farmer_product_service::upload_product_image(&state, &user, &query.file_name, &body)
            .await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
