pub mod address;
pub mod delivery;
pub mod errors;
pub mod item;
pub mod member;
pub mod order;
pub mod ports;
