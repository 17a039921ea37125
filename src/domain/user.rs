use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, UserId, UserName};

/// A registered account.
///
/// `password` holds the bcrypt hash, never the plaintext; response DTOs drop
/// it entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub password: String,
    pub created_at: NaiveDateTime,
}

/// Information required to create a new [`User`]. The password must already
/// be hashed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: String,
}
