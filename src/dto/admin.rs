use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{ApprovalStatus, User},
    routes::params::Pagination,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FarmerQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matches name or email, case-insensitively.
    pub q: Option<String>,
    pub status: Option<ApprovalStatus>,
}

impl FarmerQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateApprovalRequest {
    pub status: ApprovalStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FarmerList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}

#[derive(Debug, Default, Serialize, ToSchema, PartialEq, Eq)]
pub struct FarmerStats {
    pub total_farmers: u64,
    pub pending_approvals: u64,
    pub approved_today: u64,
    pub rejected: u64,
}
