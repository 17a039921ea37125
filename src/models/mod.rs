pub mod cart;
#[cfg(feature = "server")]
pub mod config;
pub mod product;
pub mod review;
pub mod user;
