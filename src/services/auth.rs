use crate::auth;
use crate::domain::types::{Email, UserName};
use crate::domain::user::{NewUser, User};
use crate::models::config::ServerConfig;
use crate::repository::{UserReader, UserWriter};

use super::{ServiceError, ServiceResult};

/// Register a new account and issue a session token for it.
///
/// The email must be unused; the plaintext password is hashed before it
/// reaches the repository and is never stored.
pub fn register<R>(
    name: &str,
    email: &str,
    password: &str,
    repo: &R,
    config: &ServerConfig,
) -> ServiceResult<(String, User)>
where
    R: UserReader + UserWriter,
{
    let name = UserName::new(name)?;
    let email = Email::new(email)?;
    if password.trim().is_empty() {
        return Err(ServiceError::Validation(
            "password cannot be empty".to_string(),
        ));
    }

    if repo.get_user_by_email(email.as_str())?.is_some() {
        return Err(ServiceError::Conflict(
            "user with this email already exists".to_string(),
        ));
    }

    let hashed = auth::hash_password(password).map_err(|e| {
        log::error!("failed to hash password: {e}");
        ServiceError::Internal
    })?;

    let user = repo.create_user(&NewUser {
        name,
        email,
        password: hashed,
    })?;

    let token = issue_session_token(&user, config)?;
    Ok((token, user))
}

/// Verify credentials and issue a session token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub fn login<R>(
    email: &str,
    password: &str,
    repo: &R,
    config: &ServerConfig,
) -> ServiceResult<(String, User)>
where
    R: UserReader,
{
    let email = Email::new(email).map_err(|_| ServiceError::Unauthorized)?;

    let user = repo
        .get_user_by_email(email.as_str())?
        .ok_or(ServiceError::Unauthorized)?;

    if !auth::verify_password(password, &user.password) {
        return Err(ServiceError::Unauthorized);
    }

    let token = issue_session_token(&user, config)?;
    Ok((token, user))
}

fn issue_session_token(user: &User, config: &ServerConfig) -> ServiceResult<String> {
    auth::issue_token(user.id.get(), &config.secret_key, config.token_ttl_secs).map_err(|e| {
        log::error!("failed to issue token: {e}");
        ServiceError::Internal
    })
}
