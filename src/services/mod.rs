pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod chat_service;
pub mod dashboard_service;
pub mod farm_service;
pub mod farmer_product_service;
