use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde::Serialize;
use validator::Validate;

use crate::services::ServiceError;

pub mod auth;
pub mod cart;
pub mod products;

/// JSON error body returned for every failed request.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InsufficientStock => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.to_string(),
        })
    }
}

/// Run `validator` checks on a deserialized form.
pub(crate) fn validate_form<T: Validate>(form: &T) -> Result<(), ServiceError> {
    form.validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))
}

/// Mount every API route on the given service config. Shared between the
/// server binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me)
            .service(auth::check),
    )
    .service(
        web::scope("/api/products")
            .service(products::list_products)
            .service(products::get_product)
            .service(products::add_review),
    )
    .service(
        web::scope("/api/cart")
            .service(cart::get_cart)
            .service(cart::add_to_cart)
            .service(cart::update_cart_item)
            .service(cart::remove_cart_item)
            .service(cart::clear_cart),
    );
}
