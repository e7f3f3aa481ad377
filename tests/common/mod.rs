#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use chrono::Utc;
use krishimitra::{
    config::{AppConfig, ChatConfig},
    dto::farms::FarmInput,
    entity::farms,
    middleware::auth::AuthUser,
    models::{LandUnit, Role},
    services::auth_service::issue_token,
    state::AppState,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction};
use uuid::Uuid;

/// Configuration that never opens the listener, with a private storage directory.
pub fn test_config(database_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".to_string(),
        port: 3000,
        jwt_secret: "test-secret".to_string(),
        db_max_connections: 2,
        storage_dir: std::env::temp_dir().join(format!("krishimitra-test-{}", Uuid::new_v4())),
        public_base_url: "http://127.0.0.1:3000".to_string(),
        max_upload_bytes: 1024 * 1024,
        chat: ChatConfig::default(),
    }
}

/// State over the given connection.
pub fn state_with(db: DatabaseConnection) -> AppState {
    AppState::new(db, test_config("postgres://unused"))
}

/// Statements a mock-backed state executed. The state must be the last owner of its connection.
pub fn transaction_log(state: AppState) -> Vec<Transaction> {
    match Arc::try_unwrap(state.orm) {
        Ok(db) => db.into_transaction_log(),
        Err(_) => panic!("connection is still shared"),
    }
}

/// State whose database must not be touched.
pub fn offline_state() -> AppState {
    state_with(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub fn caller(role: Role) -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role,
    }
}

pub fn bearer(state: &AppState, user: &AuthUser) -> String {
    let token = issue_token(&state.config.jwt_secret, user.user_id, user.role).expect("token");
    format!("Bearer {token}")
}

pub fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn farm_input(crops: &[&str]) -> FarmInput {
    FarmInput {
        name: "Green Valley".into(),
        state: "Punjab".into(),
        district: "Ludhiana".into(),
        village: "Dehlon".into(),
        pincode: "141001".into(),
        land_size: 3.5,
        land_unit: LandUnit::Acres,
        farming_type: "organic".into(),
        image_url: None,
        crops: crops.iter().map(|c| c.to_string()).collect(),
    }
}

/// Farm row as the database returns it for `farmer`.
pub fn stored_farm(farmer: &AuthUser) -> farms::Model {
    let now = Utc::now().fixed_offset();
    farms::Model {
        id: Uuid::new_v4(),
        farmer_id: farmer.user_id,
        name: "Green Valley".into(),
        state: "Punjab".into(),
        district: "Ludhiana".into(),
        village: "Dehlon".into(),
        pincode: "141001".into(),
        land_size: 3.5,
        land_unit: LandUnit::Acres,
        farming_type: "organic".into(),
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn done(rows: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: rows,
    }
}
