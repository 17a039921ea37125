//! Password hashing and signed session tokens.
//!
//! Passwords are bcrypt-hashed with a per-call salt; session tokens are
//! HS256 JWTs carrying only the user id and an absolute expiry. The
//! [`AuthenticatedUser`] extractor gates handlers: it resolves the bearer
//! token to a user row and short-circuits with 401 on any failure.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, http::header, web};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UserReader};
use crate::services::ServiceError;

/// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id.
    pub sub: i32,
    /// Absolute expiry as a unix timestamp.
    pub exp: i64,
}

/// Hash a plaintext password for storage. A fresh salt is generated per
/// call, so repeated hashes of the same plaintext differ.
pub fn hash_password(plaintext: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
}

/// Check a plaintext password against a stored hash. Malformed hashes count
/// as a mismatch.
pub fn verify_password(plaintext: &str, hashed: &str) -> bool {
    bcrypt::verify(plaintext, hashed).unwrap_or(false)
}

/// Issue a signed token for `user_id` expiring `ttl_secs` from now.
pub fn issue_token(
    user_id: i32,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        exp: Utc::now().timestamp() + ttl_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return the embedded user id.
///
/// Signature mismatch, structural corruption and expiry all yield `None`;
/// callers cannot distinguish the sub-causes.
pub fn verify_token(token: &str, secret: &str) -> Option<i32> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    // Expiry is checked manually so that `exp == now` already counts as
    // expired (a zero-ttl token is never valid).
    validation.validate_exp = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()?;

    if data.claims.exp <= Utc::now().timestamp() {
        return None;
    }
    Some(data.claims.sub)
}

/// Extract the bearer token from the `Authorization` header.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// The user resolved from a request's bearer token.
pub struct AuthenticatedUser(pub User);

/// Resolve the request's bearer token to a stored user.
pub fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let token = bearer_token(req).ok_or(ServiceError::Unauthorized)?;

    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or(ServiceError::Internal)?;
    let repo = req
        .app_data::<web::Data<DieselRepository>>()
        .ok_or(ServiceError::Internal)?;

    let user_id = verify_token(token, &config.secret_key).ok_or(ServiceError::Unauthorized)?;
    let user_id = UserId::new(user_id).map_err(|_| ServiceError::Unauthorized)?;

    match repo.get_user_by_id(user_id) {
        Ok(Some(user)) => Ok(AuthenticatedUser(user)),
        Ok(None) => Err(ServiceError::Unauthorized),
        Err(e) => {
            log::error!("failed to load user for token: {e}");
            Err(ServiceError::Internal)
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
