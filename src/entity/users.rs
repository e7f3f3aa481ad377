use sea_orm::entity::prelude::*;

use crate::models::{ApprovalStatus, Role};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub mobile: Option<String>,
    pub role: Role,
    pub approval_status: ApprovalStatus,
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::farms::Entity")]
    Farms,
    #[sea_orm(has_many = "super::farmer_products::Entity")]
    FarmerProducts,
}

impl Related<super::farms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farms.def()
    }
}

impl Related<super::farmer_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmerProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
