pub mod analytics;
pub mod auth_service;
pub mod order_service;
pub mod product_service;
pub mod vendor_service;
