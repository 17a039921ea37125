use serde::Deserialize;
use validator::Validate;

use crate::repository::ProductListQuery;

/// Query string accepted by the product listing endpoint. Unset parameters
/// impose no constraint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQueryParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub is_new: Option<bool>,
    pub trending: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<ProductsQueryParams> for ProductListQuery {
    fn from(params: ProductsQueryParams) -> Self {
        let mut query = ProductListQuery::default();
        if let Some(category) = params.category {
            query = query.category(category);
        }
        if let Some(search) = params.search {
            query = query.search(search);
        }
        if let Some(min_price) = params.min_price {
            query = query.min_price(min_price);
        }
        if let Some(max_price) = params.max_price {
            query = query.max_price(max_price);
        }
        if let Some(sort) = params.sort {
            query = query.sort(&sort);
        }
        if let Some(is_new) = params.is_new {
            query = query.is_new(is_new);
        }
        if let Some(trending) = params.trending {
            query = query.trending(trending);
        }
        if let Some(limit) = params.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = params.offset {
            query = query.offset(offset);
        }
        query
    }
}

/// Review submission body.
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub comment: String,
}
