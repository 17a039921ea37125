pub mod cart;
pub mod products;
pub mod user;
