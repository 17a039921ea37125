pub mod auth;
pub mod cart;
pub mod errors;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
