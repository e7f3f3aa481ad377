mod common;

use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
    routing::post,
};
use krishimitra::{
    chat::{ChatClient, ChatError, SYSTEM_PROMPT},
    config::ChatConfig,
    dto::chat::ChatMessage,
    error::AppError,
    routes::create_app,
    services::chat_service,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

fn client(api_url: String) -> ChatClient {
    ChatClient::new(ChatConfig {
        api_url,
        api_key: Some("test-key".into()),
        model: "llama3-8b-8192".into(),
    })
}

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    assert_eq!(body["model"], "llama3-8b-8192");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    let question = body["messages"][1]["content"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": format!("You asked: {question}") } }]
        })),
    )
}

#[tokio::test]
async fn forwards_message_with_system_prompt() {
    let base = serve(Router::new().route("/chat/completions", post(echo))).await;
    let reply = client(base).ask("Where is my order?").await.expect("reply");
    assert_eq!(reply, "You asked: Where is my order?");
}

#[tokio::test]
async fn upstream_status_is_reported() {
    let base = serve(Router::new().route(
        "/chat/completions",
        post(|| async { StatusCode::TOO_MANY_REQUESTS }),
    ))
    .await;
    let err = client(base).ask("hello").await.unwrap_err();
    assert!(matches!(err, ChatError::Service(code) if code == StatusCode::TOO_MANY_REQUESTS));
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let base = serve(Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    ))
    .await;
    let err = client(base).ask("hello").await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyReply));
}

#[tokio::test]
async fn missing_key_is_not_configured() {
    let err = ChatClient::new(ChatConfig::default()).ask("hello").await.unwrap_err();
    assert!(matches!(err, ChatError::NotConfigured));
}

#[tokio::test]
async fn blank_messages_never_reach_the_assistant() {
    let state = common::offline_state();
    let err = chat_service::reply(&state, ChatMessage { message: "   ".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn chat_endpoint_answers_502_without_upstream() {
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"message":"hi"}"#))
        .expect("request");

    let response = create_app(common::offline_state())
        .oneshot(request)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
