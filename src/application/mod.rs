pub mod item_service;
pub mod member_service;
pub mod order_service;
