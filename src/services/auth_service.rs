use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ApprovalStatus, Role, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 24;
const MIN_PASSWORD_LEN: usize = 6;

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        email,
        password,
        full_name,
        mobile,
        user_type,
    } = payload;
    let email = normalize_email(&email)?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if user_type == Role::Admin {
        return Err(AppError::BadRequest(
            "user_type must be user or farmer".into(),
        ));
    }

    let exist = Users::find()
        .filter(Column::Email.eq(email.as_str()))
        .one(state.db())
        .await?;
    if exist.is_some() {
        return Err(email_taken());
    }

    let password_hash = hash_password(&password)?;
    let approval_status = match user_type {
        Role::Farmer => ApprovalStatus::Pending,
        _ => ApprovalStatus::Approved,
    };

    let user = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        full_name: Set(full_name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())),
        mobile: Set(mobile.map(|m| m.trim().to_string()).filter(|m| !m.is_empty())),
        role: Set(user_type),
        approval_status: Set(approval_status),
        reviewed_at: Set(None),
        created_at: NotSet,
    }
    .insert(state.db())
    .await
    .map_err(duplicate_email)?;

    tracing::info!(user_id = %user.id, role = %user.role, "user registered");
    Ok(ApiResponse::success(
        "User created",
        user_from_entity(user),
        None,
    ))
}

fn email_taken() -> AppError {
    AppError::BadRequest("Email is already taken".to_string())
}

/// A concurrent sign-up can pass the lookup and lose on the unique index.
fn duplicate_email(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => email_taken(),
        _ => err.into(),
    }
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim().to_lowercase();
    let user = Users::find()
        .filter(Column::Email.eq(email.as_str()))
        .one(state.db())
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let token = issue_token(&state.config.jwt_secret, user.id, user.role)?;
    tracing::info!(user_id = %user.id, "user signed in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {token}"),
            user: user_from_entity(user),
        },
        Some(Meta::empty()),
    ))
}

/// Drops the caller's session state. Tokens are stateless, so only the cart goes.
pub async fn logout_user(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let dropped = state.carts.take(user.user_id).await;
    tracing::info!(user_id = %user.user_id, lines = dropped.lines().len(), "user signed out");
    Ok(ApiResponse::done("Signed out"))
}

pub async fn profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found = find_user(state.db(), user.user_id).await?;
    Ok(ApiResponse::success("Profile", found, None))
}

pub async fn find_user(db: &OrmConn, id: Uuid) -> AppResult<User> {
    let found = Users::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(user_from_entity(found))
}

/// Signs a token carrying the user id and role.
pub fn issue_token(secret: &str, user_id: Uuid, role: Role) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::BadRequest("a valid email is required".into())),
    }
}

pub(crate) fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        full_name: model.full_name,
        mobile: model.mobile,
        role: model.role,
        approval_status: model.approval_status,
        reviewed_at: model.reviewed_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
