use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Farm, FarmerProduct};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub farms: usize,
    pub products: usize,
    pub total_stock: i64,
    pub out_of_stock: usize,
    pub distinct_crops: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub farms: Vec<Farm>,
    pub products: Vec<FarmerProduct>,
    pub stats: DashboardStats,
}
