use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::admin::{FarmerList, FarmerQuery, FarmerStats, UpdateApprovalRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/farmers", get(list_farmers))
        .route("/farmers/{id}/status", patch(update_approval))
        .route("/stats", get(farmer_stats))
}

#[utoipa::path(
    get,
    path = "/api/admin/farmers",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search by name or email"),
        ("status" = Option<String>, Query, description = "pending, approved or rejected")
    ),
    responses(
        (status = 200, description = "Farmer accounts", body = ApiResponse<FarmerList>),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_farmers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FarmerQuery>,
) -> AppResult<Json<ApiResponse<FarmerList>>> {
    let resp = admin_service::list_farmers(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Farmer approval counters", body = ApiResponse<FarmerStats>),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn farmer_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FarmerStats>>> {
    let resp = admin_service::farmer_stats(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/farmers/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Farmer ID")
    ),
    request_body = UpdateApprovalRequest,
    responses(
        (status = 200, description = "Review recorded", body = ApiResponse<User>),
        (status = 404, description = "Farmer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_approval(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApprovalRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = admin_service::update_approval(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
