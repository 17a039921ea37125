use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview, ReviewAuthor};
use crate::domain::types::{Rating, ReviewId, TypeConstraintError, UserId};

/// Diesel representation of a review row.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

impl Review {
    /// Joins the row with the author's display name fetched alongside it.
    pub fn into_domain(self, author_name: String) -> Result<DomainReview, TypeConstraintError> {
        Ok(DomainReview {
            id: ReviewId::new(self.id)?,
            rating: Rating::new(self.rating)?,
            comment: self.comment,
            author: ReviewAuthor {
                id: UserId::new(self.user_id)?,
                name: author_name,
            },
            created_at: self.created_at,
        })
    }
}

/// Insertable review row.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview {
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
}

impl From<&DomainNewReview> for NewReview {
    fn from(review: &DomainNewReview) -> Self {
        Self {
            product_id: review.product_id.get(),
            user_id: review.user_id.get(),
            rating: review.rating.get(),
            comment: review.comment.clone(),
        }
    }
}
