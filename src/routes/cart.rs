use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::dto::cart::CartDto;
use crate::forms::cart::{AddToCartForm, UpdateCartItemForm};
use crate::repository::DieselRepository;
use crate::routes::validate_form;
use crate::services::ServiceError;
use crate::services::cart::{
    add_to_cart as add_to_cart_service, clear_cart as clear_cart_service,
    remove_from_cart as remove_from_cart_service, update_cart_item as update_cart_item_service,
    view_cart as view_cart_service,
};

#[get("")]
pub async fn get_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let cart = view_cart_service(&user.0, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(CartDto::from(cart)))
}

#[post("")]
pub async fn add_to_cart(
    form: web::Json<AddToCartForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&*form)?;
    let form = form.into_inner();

    let cart = add_to_cart_service(form.product_id, form.quantity, &user.0, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(CartDto::from(cart)))
}

#[put("/{item_id}")]
pub async fn update_cart_item(
    item_id: web::Path<i32>,
    form: web::Json<UpdateCartItemForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&*form)?;

    let cart = update_cart_item_service(
        item_id.into_inner(),
        form.quantity,
        &user.0,
        repo.get_ref(),
    )?;
    Ok(HttpResponse::Ok().json(CartDto::from(cart)))
}

#[delete("/{item_id}")]
pub async fn remove_cart_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let cart = remove_from_cart_service(item_id.into_inner(), &user.0, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(CartDto::from(cart)))
}

#[delete("")]
pub async fn clear_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let cart = clear_cart_service(&user.0, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(CartDto::from(cart)))
}
