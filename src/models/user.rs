use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{Email, TypeConstraintError, UserId, UserName};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

/// Diesel representation of a user row.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(user.id)?,
            name: UserName::new(user.name)?,
            email: Email::new(user.email)?,
            password: user.password,
            created_at: user.created_at,
        })
    }
}

/// Insertable user row. `password` is the bcrypt hash.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<&DomainNewUser> for NewUser {
    fn from(user: &DomainNewUser) -> Self {
        Self {
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            password: user.password.clone(),
        }
    }
}
