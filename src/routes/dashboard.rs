use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::dashboard::Dashboard,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Farms, listings and counters", body = ApiResponse<Dashboard>),
        (status = 403, description = "Not a farmer")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Dashboard>>> {
    let resp = dashboard_service::load_dashboard(&state, &user).await?;
    Ok(Json(resp))
}
