//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be positive was zero/negative or invalid.
    #[error("{0} must be greater than zero")]
    NonPositiveNumber(&'static str),
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Email address validation failed.
    #[error("invalid email address")]
    InvalidEmail,
    /// Review rating outside the 1..=5 range.
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    /// Discount percentage outside the 0..=100 range.
    #[error("discount must be between 0 and 100")]
    InvalidDiscount,
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a user.", "user_id");
id_newtype!(ProductId, "Unique identifier for a product.", "product_id");
id_newtype!(ReviewId, "Unique identifier for a review.", "review_id");
id_newtype!(CartItemId, "Unique identifier for a cart line.", "cart_item_id");

non_empty_string_newtype!(
    UserName,
    "User display name enforcing non-empty values.",
    "name"
);
non_empty_string_newtype!(
    ProductName,
    "Product name enforcing non-empty values.",
    "product name"
);

/// Email address, trimmed, lowercased and format-checked.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Constructs a validated email address.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?.to_lowercase();
        if !trimmed.validate_email() {
            return Err(TypeConstraintError::InvalidEmail);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative price value in standard currency units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct ProductPrice(f64);

impl ProductPrice {
    /// Constructs a finite price that is zero or greater.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("price"))
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ProductPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for ProductPrice {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductPrice> for f64 {
    fn from(value: ProductPrice) -> Self {
        value.0
    }
}

/// Units of a product available for sale; zero or greater.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Stock(i32);

impl Stock {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("stock"))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for Stock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Stock {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Quantity of one product in a cart line; strictly positive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveNumber("quantity"))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Review rating in the inclusive 1..=5 range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Rating(i32);

impl Rating {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidRating)
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Rating {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Discount percentage in the inclusive 0..=100 range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DiscountPercent(i32);

impl DiscountPercent {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (0..=100).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidDiscount)
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for DiscountPercent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for DiscountPercent {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = ProductName::new("  Wireless Earbuds  ").unwrap();
        assert_eq!(value.as_str(), "Wireless Earbuds");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ProductId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("product_id"));
    }

    #[test]
    fn lowercases_and_validates_emails() {
        let email = Email::new("  Jane@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jane@example.com");
        assert_eq!(
            Email::new("not-an-email").unwrap_err(),
            TypeConstraintError::InvalidEmail
        );
    }

    #[test]
    fn product_price_allows_zero() {
        assert_eq!(ProductPrice::new(0.0).unwrap().get(), 0.0);
    }

    #[test]
    fn product_price_rejects_negative_numbers() {
        assert_eq!(
            ProductPrice::new(-0.01).unwrap_err(),
            TypeConstraintError::NegativeNumber("price")
        );
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(Quantity::new(1).is_ok());
        assert_eq!(
            Quantity::new(0).unwrap_err(),
            TypeConstraintError::NonPositiveNumber("quantity")
        );
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(Rating::new(0).unwrap_err(), TypeConstraintError::InvalidRating);
        assert_eq!(Rating::new(6).unwrap_err(), TypeConstraintError::InvalidRating);
    }
}
