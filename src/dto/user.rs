use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::user::User;

/// A user as exposed in responses; the password hash is never included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.into_inner(),
            email: user.email.into_inner(),
            created_at: user.created_at,
        }
    }
}
