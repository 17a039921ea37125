use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    DiscountPercent, ProductId, ProductName, ProductPrice, Stock, TypeConstraintError,
};

/// Diesel representation of a product row.
///
/// `images` holds the JSON-encoded URL array exactly as stored; decoding
/// happens in the conversion to the domain type and nowhere else.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: i32,
    pub stock: i32,
    pub category: String,
    pub images: String,
    pub is_new: bool,
    pub trending: bool,
    pub rating: f64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            name: ProductName::new(product.name)?,
            description: product.description,
            price: ProductPrice::new(product.price)?,
            original_price: product.original_price.map(ProductPrice::new).transpose()?,
            discount: DiscountPercent::new(product.discount)?,
            stock: Stock::new(product.stock)?,
            category: product.category,
            images: decode_images(&product.images),
            is_new: product.is_new,
            trending: product.trending,
            rating: product.rating,
            created_at: product.created_at,
            reviews: Vec::new(),
        })
    }
}

/// Insertable product row.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: i32,
    pub stock: i32,
    pub category: String,
    pub images: String,
    pub is_new: bool,
    pub trending: bool,
    pub rating: f64,
}

impl From<&DomainNewProduct> for NewProduct {
    fn from(product: &DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            description: product.description.clone(),
            price: product.price.get(),
            original_price: product.original_price.map(ProductPrice::get),
            discount: product.discount.get(),
            stock: product.stock.get(),
            category: product.category.clone(),
            images: encode_images(&product.images),
            is_new: product.is_new,
            trending: product.trending,
            rating: 0.0,
        }
    }
}

/// Decode the JSON image column; malformed data degrades to an empty list
/// rather than failing the whole row, matching the store's lenient reads.
pub(crate) fn decode_images(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

pub(crate) fn encode_images(images: &[String]) -> String {
    serde_json::to_string(images).unwrap_or_else(|_| String::from("[]"))
}
