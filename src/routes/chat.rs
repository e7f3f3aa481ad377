use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::chat::{ChatMessage, ChatReply},
    error::AppResult,
    services::chat_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatMessage,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply),
        (status = 400, description = "Empty or oversized message"),
        (status = 502, description = "Assistant unavailable")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatMessage>,
) -> AppResult<Json<ChatReply>> {
    let reply = chat_service::reply(&state, payload).await?;
    Ok(Json(reply))
}
