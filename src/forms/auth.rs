use serde::Deserialize;
use validator::Validate;

/// Registration request body.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login request body. The email is deliberately not format-checked here:
/// a malformed address must fail the same way a wrong password does.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
