use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProductId, Rating, ReviewId, UserId};

/// A product review joined with its author's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub rating: Rating,
    pub comment: String,
    pub author: ReviewAuthor,
    pub created_at: NaiveDateTime,
}

/// The user who wrote a review, reduced to what responses expose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub id: UserId,
    pub name: String,
}

/// Information required to append a new review to a product.
///
/// Reviews are append-only; there is no update or delete operation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: Rating,
    pub comment: String,
}
