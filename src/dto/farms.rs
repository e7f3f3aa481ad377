use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{Farm, LandUnit},
};

/// Fields a farmer fills in when adding or editing a farm.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FarmInput {
    pub name: String,
    pub state: String,
    pub district: String,
    pub village: String,
    pub pincode: String,
    pub land_size: f64,
    pub land_unit: LandUnit,
    pub farming_type: String,
    /// Public URL returned by the farm image upload; kept unchanged on update when absent.
    pub image_url: Option<String>,
    #[serde(default)]
    pub crops: Vec<String>,
}

impl FarmInput {
    /// Trims text fields and checks them the way the farm form does.
    pub fn validated(mut self) -> Result<Self, AppError> {
        for (field, value) in [
            ("name", &mut self.name),
            ("state", &mut self.state),
            ("district", &mut self.district),
            ("village", &mut self.village),
            ("farming_type", &mut self.farming_type),
        ] {
            *value = value.trim().to_string();
            if value.is_empty() {
                return Err(AppError::BadRequest(format!("{field} is required")));
            }
        }

        self.pincode = self.pincode.trim().to_string();
        if self.pincode.len() != 6 || !self.pincode.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "pincode must be a 6-digit number".into(),
            ));
        }

        if !self.land_size.is_finite() || self.land_size < 0.0 {
            return Err(AppError::BadRequest(
                "land_size must not be negative".into(),
            ));
        }

        self.crops = self
            .crops
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(self)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FarmList {
    #[schema(value_type = Vec<Farm>)]
    pub items: Vec<Farm>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadQuery {
    pub file_name: String,
}
