use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::farms::{FarmInput, FarmList, UploadQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Farm,
    response::ApiResponse,
    services::farm_service,
    state::AppState,
    storage::UploadedObject,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_farms).post(create_farm))
        .route("/{id}", put(update_farm).delete(delete_farm))
        .route("/images", post(upload_farm_image))
}

#[utoipa::path(
    get,
    path = "/api/farms",
    responses(
        (status = 200, description = "Caller's farms with crops", body = ApiResponse<FarmList>),
        (status = 403, description = "Not a farmer")
    ),
    security(("bearer_auth" = [])),
    tag = "Farms"
)]
pub async fn list_farms(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FarmList>>> {
    let resp = farm_service::list_farms(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/farms",
    request_body = FarmInput,
    responses(
        (status = 201, description = "Farm and crops created", body = ApiResponse<Farm>),
        (status = 400, description = "Invalid farm details"),
        (status = 500, description = "Farm or crops could not be stored")
    ),
    security(("bearer_auth" = [])),
    tag = "Farms"
)]
pub async fn create_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FarmInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Farm>>)> {
    let resp = farm_service::create_farm(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/farms/{id}",
    params(
        ("id" = Uuid, Path, description = "Farm ID")
    ),
    request_body = FarmInput,
    responses(
        (status = 200, description = "Farm updated, crops replaced", body = ApiResponse<Farm>),
        (status = 404, description = "Farm not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Farms"
)]
pub async fn update_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FarmInput>,
) -> AppResult<Json<ApiResponse<Farm>>> {
    let resp = farm_service::update_farm(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/farms/{id}",
    params(
        ("id" = Uuid, Path, description = "Farm ID")
    ),
    responses(
        (status = 200, description = "Farm deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Farm not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Farms"
)]
pub async fn delete_farm(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = farm_service::delete_farm(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/farms/images",
    params(
        ("file_name" = String, Query, description = "Original file name; its extension is kept")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Stored in farm_images", body = ApiResponse<UploadedObject>),
        (status = 400, description = "Empty file")
    ),
    security(("bearer_auth" = [])),
    tag = "Farms"
)]
pub async fn upload_farm_image(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ApiResponse<UploadedObject>>)> {
    let resp = farm_service::upload_farm_image(&state, &user, &query.file_name, &body).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
