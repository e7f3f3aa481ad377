use sea_orm::entity::prelude::*;

use crate::models::LandUnit;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "farms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub name: String,
    pub state: String,
    pub district: String,
    pub village: String,
    pub pincode: String,
    #[sea_orm(column_type = "Double")]
    pub land_size: f64,
    pub land_unit: LandUnit,
    pub farming_type: String,
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FarmerId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::farm_crops::Entity")]
    FarmCrops,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::farm_crops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmCrops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
