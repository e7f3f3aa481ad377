use crate::{
    chat::ChatError,
    dto::chat::{ChatMessage, ChatReply},
    error::{AppError, AppResult},
    state::AppState,
};

const MAX_MESSAGE_CHARS: usize = 2000;

pub async fn reply(state: &AppState, payload: ChatMessage) -> AppResult<ChatReply> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".into()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "message must be at most {MAX_MESSAGE_CHARS} characters"
        )));
    }

    match state.chat.ask(message).await {
        Ok(response) => Ok(ChatReply { response }),
        Err(err) => {
            tracing::warn!(error = %err, "chat completion failed");
            Err(match err {
                ChatError::NotConfigured => AppError::Upstream(err.to_string()),
                _ => AppError::Upstream("assistant is unavailable".into()),
            })
        }
    }
}
