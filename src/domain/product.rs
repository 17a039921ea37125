use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::review::Review;
use crate::domain::types::{DiscountPercent, ProductId, ProductName, ProductPrice, Stock};

/// A catalog product together with its reviews.
///
/// `rating` is derived state: the arithmetic mean of the review ratings,
/// recomputed whenever a review is inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: String,
    pub price: ProductPrice,
    pub original_price: Option<ProductPrice>,
    pub discount: DiscountPercent,
    pub stock: Stock,
    pub category: String,
    /// Ordered image URLs. Stored as a JSON array column; the encoded form
    /// never leaks past the models layer.
    pub images: Vec<String>,
    pub is_new: bool,
    pub trending: bool,
    pub rating: f64,
    pub created_at: NaiveDateTime,
    pub reviews: Vec<Review>,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: String,
    pub price: ProductPrice,
    pub original_price: Option<ProductPrice>,
    pub discount: DiscountPercent,
    pub stock: Stock,
    pub category: String,
    pub images: Vec<String>,
    pub is_new: bool,
    pub trending: bool,
}
