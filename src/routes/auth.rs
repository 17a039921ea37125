use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Serialize;

use crate::auth::{AuthenticatedUser, authenticate};
use crate::dto::user::UserDto;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::validate_form;
use crate::services::ServiceError;
use crate::services::auth::{login as login_service, register as register_service};

#[derive(Serialize)]
struct AuthResponse {
    token: String,
    user: UserDto,
}

#[derive(Serialize)]
struct UserResponse {
    user: UserDto,
}

#[derive(Serialize)]
struct CheckResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserDto>,
}

#[post("/register")]
pub async fn register(
    form: web::Json<RegisterForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&*form)?;
    let form = form.into_inner();

    let (token, user) = register_service(
        &form.name,
        &form.email,
        &form.password,
        repo.get_ref(),
        config.get_ref(),
    )?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[post("/login")]
pub async fn login(
    form: web::Json<LoginForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&*form)?;
    let form = form.into_inner();

    let (token, user) = login_service(&form.email, &form.password, repo.get_ref(), config.get_ref())?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse {
        user: user.0.into(),
    })
}

/// Reports whether the request carries a valid token. Always 200; a missing
/// or bad token is `authenticated: false`, never an error.
#[get("/check")]
pub async fn check(req: HttpRequest) -> HttpResponse {
    match authenticate(&req) {
        Ok(AuthenticatedUser(user)) => HttpResponse::Ok().json(CheckResponse {
            authenticated: true,
            user: Some(user.into()),
        }),
        Err(_) => HttpResponse::Ok().json(CheckResponse {
            authenticated: false,
            user: None,
        }),
    }
}
