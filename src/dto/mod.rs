pub mod admin;
pub mod auth;
pub mod cart;
pub mod chat;
pub mod dashboard;
pub mod farmer_products;
pub mod farms;
pub mod pages;
