use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{FarmerProduct, ProductUnit},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub unit: ProductUnit,
    /// Price per unit in paise.
    pub price: i64,
    pub stock: i32,
    pub image_url: Option<String>,
}

impl ProductInput {
    pub fn validated(mut self) -> Result<Self, AppError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(AppError::BadRequest("name is required".into()));
        }
        self.category = self.category.trim().to_lowercase();
        if self.category.is_empty() {
            return Err(AppError::BadRequest("category is required".into()));
        }
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if self.price < 0 {
            return Err(AppError::BadRequest("price must not be negative".into()));
        }
        if self.stock < 0 {
            return Err(AppError::BadRequest("stock must not be negative".into()));
        }
        Ok(self)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FarmerProductList {
    #[schema(value_type = Vec<FarmerProduct>)]
    pub items: Vec<FarmerProduct>,
}
