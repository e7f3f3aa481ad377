pub mod farm_crops;
pub mod farmer_products;
pub mod farms;
pub mod users;

pub use farm_crops::Entity as FarmCrops;
pub use farmer_products::Entity as FarmerProducts;
pub use farms::Entity as Farms;
pub use users::Entity as Users;
