use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::dashboard::{Dashboard, DashboardStats},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_farmer},
    models::{Farm, FarmerProduct},
    response::{ApiResponse, Meta},
    services::{farm_service, farmer_product_service},
    state::AppState,
};

/// Loads farms and listings together; either failure fails the whole load.
pub async fn load_dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Dashboard>> {
    ensure_farmer(user)?;
    let dashboard = build_dashboard(state.db(), user.user_id).await?;
    Ok(ApiResponse::success("Dashboard", dashboard, Some(Meta::empty())))
}

pub async fn build_dashboard(db: &OrmConn, farmer_id: Uuid) -> AppResult<Dashboard> {
    let (farms, products) = tokio::try_join!(
        farm_service::fetch_farms(db, farmer_id),
        farmer_product_service::fetch_products(db, farmer_id),
    )?;

    let stats = dashboard_stats(&farms, &products);
    Ok(Dashboard {
        farms,
        products,
        stats,
    })
}

pub fn dashboard_stats(farms: &[Farm], products: &[FarmerProduct]) -> DashboardStats {
    let distinct_crops = farms
        .iter()
        .flat_map(|f| f.crops.iter())
        .map(|c| c.to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    DashboardStats {
        farms: farms.len(),
        products: products.len(),
        total_stock: products.iter().map(|p| i64::from(p.stock)).sum(),
        out_of_stock: products.iter().filter(|p| p.stock == 0).count(),
        distinct_crops,
    }
}
