use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::dto::products::ProductDto;
use crate::forms::products::{ProductsQueryParams, ReviewForm};
use crate::repository::DieselRepository;
use crate::routes::validate_form;
use crate::services::ServiceError;
use crate::services::products::{
    add_review as add_review_service, get_product as get_product_service,
    list_products as list_products_service,
};

#[derive(Serialize)]
struct ProductsResponse {
    products: Vec<ProductDto>,
    count: usize,
}

#[derive(Serialize)]
struct ProductResponse {
    product: ProductDto,
}

#[get("")]
pub async fn list_products(
    params: web::Query<ProductsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (count, products) = list_products_service(params.into_inner().into(), repo.get_ref())?;

    Ok(HttpResponse::Ok().json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
        count,
    }))
}

#[get("/{product_id}")]
pub async fn get_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let product = get_product_service(product_id.into_inner(), repo.get_ref())?;

    Ok(HttpResponse::Ok().json(ProductResponse {
        product: product.into(),
    }))
}

#[post("/{product_id}/reviews")]
pub async fn add_review(
    product_id: web::Path<i32>,
    form: web::Json<ReviewForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    validate_form(&*form)?;
    let form = form.into_inner();

    let product = add_review_service(
        product_id.into_inner(),
        form.rating,
        form.comment,
        &user.0,
        repo.get_ref(),
    )?;

    Ok(HttpResponse::Created().json(ProductResponse {
        product: product.into(),
    }))
}
