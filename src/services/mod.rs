pub mod item_service;
pub mod payment_service;
pub mod product_service;
pub mod sale_service;
