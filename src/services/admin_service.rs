use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::admin::{FarmerList, FarmerQuery, FarmerStats, UpdateApprovalRequest},
    entity::users::{ActiveModel, Column, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ApprovalStatus, Role, User},
    response::{ApiResponse, Meta},
    services::auth_service::user_from_entity,
    state::AppState,
};

/// `ILIKE` pattern matching `search` anywhere, with its wildcards taken literally.
pub fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub async fn list_farmers(
    state: &AppState,
    user: &AuthUser,
    query: FarmerQuery,
) -> AppResult<ApiResponse<FarmerList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all().add(Column::Role.eq(Role::Farmer));
    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::FullName).ilike(pattern.clone()))
                .add(Expr::col(Column::Email).ilike(pattern)),
        );
    }
    if let Some(status) = query.status {
        condition = condition.add(Column::ApprovalStatus.eq(status));
    }

    let finder = Users::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(state.db()).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Farmers", FarmerList { items }, Some(meta)))
}

pub async fn farmer_stats(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<FarmerStats>> {
    ensure_admin(user)?;
    let stats = load_stats(state.db()).await?;
    Ok(ApiResponse::success("Farmer stats", stats, Some(Meta::empty())))
}

pub async fn load_stats(db: &OrmConn) -> AppResult<FarmerStats> {
    let start_of_day = Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("invalid start of day")))?
        .and_utc()
        .fixed_offset();

    let farmers = || Users::find().filter(Column::Role.eq(Role::Farmer));
    let (total_farmers, pending_approvals, approved_today, rejected) = tokio::try_join!(
        farmers().count(db),
        farmers()
            .filter(Column::ApprovalStatus.eq(ApprovalStatus::Pending))
            .count(db),
        farmers()
            .filter(Column::ApprovalStatus.eq(ApprovalStatus::Approved))
            .filter(Column::ReviewedAt.gte(start_of_day))
            .count(db),
        farmers()
            .filter(Column::ApprovalStatus.eq(ApprovalStatus::Rejected))
            .count(db),
    )?;

    Ok(FarmerStats {
        total_farmers,
        pending_approvals,
        approved_today,
        rejected,
    })
}

pub async fn update_approval(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateApprovalRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let existing = Users::find_by_id(id)
        .filter(Column::Role.eq(Role::Farmer))
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.approval_status = Set(payload.status);
    active.reviewed_at = Set(Some(Utc::now().fixed_offset()));
    let farmer = active.update(state.db()).await?;

    tracing::info!(
        farmer_id = %farmer.id,
        admin_id = %user.user_id,
        status = ?farmer.approval_status,
        "farmer review recorded"
    );
    Ok(ApiResponse::success(
        "Farmer updated",
        user_from_entity(farmer),
        Some(Meta::empty()),
    ))
}
