use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;
use crate::domain::review::Review;

/// A catalog product as exposed in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: i32,
    pub stock: i32,
    pub category: String,
    pub images: Vec<String>,
    pub is_new: bool,
    pub trending: bool,
    pub rating: f64,
    pub created_at: NaiveDateTime,
    pub reviews: Vec<ReviewDto>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.into_inner(),
            description: product.description,
            price: product.price.get(),
            original_price: product.original_price.map(|p| p.get()),
            discount: product.discount.get(),
            stock: product.stock.get(),
            category: product.category,
            images: product.images,
            is_new: product.is_new,
            trending: product.trending,
            rating: product.rating,
            created_at: product.created_at,
            reviews: product.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub rating: i32,
    pub comment: String,
    pub user: ReviewUserDto,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewUserDto {
    pub id: i32,
    pub name: String,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.get(),
            rating: review.rating.get(),
            comment: review.comment,
            user: ReviewUserDto {
                id: review.author.id.get(),
                name: review.author.name,
            },
            created_at: review.created_at,
        }
    }
}
