use crate::db::{DbConnection, DbPool};
use crate::domain::cart::Cart;
use crate::domain::product::{NewProduct, Product};
use crate::domain::review::NewReview;
use crate::domain::types::{CartItemId, ProductId, Quantity, UserId};
use crate::domain::user::{NewUser, User};

pub mod cart;
pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Default number of products returned when a listing omits `limit`.
pub const DEFAULT_PRODUCT_LIMIT: i64 = 100;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Recognized product sort fields, parsed from the API's sort tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Rating,
    CreatedAt,
    Name,
}

/// A sort criterion with direction. A leading `-` on the raw token means
/// descending; unrecognized fields parse to `None` and callers fall back to
/// the default ordering instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub descending: bool,
}

impl ProductSort {
    pub fn parse(raw: &str) -> Option<Self> {
        let (descending, name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let field = match name {
            "price" => SortField::Price,
            "rating" => SortField::Rating,
            "createdAt" => SortField::CreatedAt,
            "name" => SortField::Name,
            _ => return None,
        };
        Some(Self { field, descending })
    }
}

/// Query parameters used when listing products.
///
/// Unset criteria impose no constraint; set criteria are ANDed. The
/// pseudo-categories `new-arrivals` and `trending` rewrite into their
/// boolean flags and never match the literal category column.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub is_new: Option<bool>,
    pub trending: Option<bool>,
    pub sort: Option<ProductSort>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            min_price: None,
            max_price: None,
            is_new: None,
            trending: None,
            sort: None,
            limit: DEFAULT_PRODUCT_LIMIT,
            offset: 0,
        }
    }
}

impl ProductListQuery {
    /// Filter by category, case-normalized. The two pseudo-categories map to
    /// their boolean flags with no category constraint.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into().trim().to_lowercase();
        if category.is_empty() {
            return self;
        }
        match category.as_str() {
            "new-arrivals" => self.is_new = Some(true),
            "trending" => self.trending = Some(true),
            _ => self.category = Some(category),
        }
        self
    }

    /// Case-insensitive substring match against name or description.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        if !search.is_empty() {
            self.search = Some(search);
        }
        self
    }

    /// Inclusive lower price bound.
    pub fn min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    /// Inclusive upper price bound.
    pub fn max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn is_new(mut self, is_new: bool) -> Self {
        self.is_new = Some(is_new);
        self
    }

    pub fn trending(mut self, trending: bool) -> Self {
        self.trending = Some(trending);
        self
    }

    /// Sort by a raw token such as `price` or `-createdAt`. Unrecognized
    /// tokens are ignored.
    pub fn sort(mut self, raw: &str) -> Self {
        self.sort = ProductSort::parse(raw);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit.max(0);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset.max(0);
        self
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query. Returns the number of
    /// matches before pagination alongside the page of products, each
    /// populated with its full review list.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier, reviews attached.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product and return it as stored.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
}

/// Append-only review operations.
pub trait ReviewWriter {
    /// Insert a review and recompute the product's average rating in the
    /// same transaction. Returns the updated product.
    fn add_review(&self, review: &NewReview) -> RepositoryResult<Product>;
}

/// Read-only operations for user entities.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

/// Write operations for user entities.
pub trait UserWriter {
    /// Persist a new user. The email unique constraint surfaces as
    /// [`RepositoryError::Conflict`].
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only cart operations.
pub trait CartReader {
    /// The user's cart joined with current product data. An absent cart is
    /// an empty view, not an error.
    fn get_cart(&self, user_id: UserId) -> RepositoryResult<Cart>;
}

/// Cart mutations. Every method runs its stock check and write inside one
/// write-locking transaction, so concurrent mutations cannot oversell.
pub trait CartWriter {
    /// Add `quantity` of a product, merging into an existing line for the
    /// same (user, product) pair.
    fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> RepositoryResult<()>;
    /// Overwrite a line's quantity (absolute set, not additive).
    fn set_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: Quantity,
    ) -> RepositoryResult<()>;
    /// Delete a line owned by the user.
    fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> RepositoryResult<()>;
    /// Delete all lines for the user; succeeds even when the cart is empty.
    fn clear_cart(&self, user_id: UserId) -> RepositoryResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sort_tokens() {
        let sort = ProductSort::parse("-price").unwrap();
        assert_eq!(sort.field, SortField::Price);
        assert!(sort.descending);

        let sort = ProductSort::parse("createdAt").unwrap();
        assert_eq!(sort.field, SortField::CreatedAt);
        assert!(!sort.descending);

        assert!(ProductSort::parse("stock").is_none());
        assert!(ProductSort::parse("").is_none());
    }

    #[test]
    fn pseudo_categories_rewrite_to_flags() {
        let query = ProductListQuery::default().category("New-Arrivals");
        assert_eq!(query.category, None);
        assert_eq!(query.is_new, Some(true));

        let query = ProductListQuery::default().category("trending");
        assert_eq!(query.category, None);
        assert_eq!(query.trending, Some(true));
    }

    #[test]
    fn literal_categories_are_lowercased() {
        let query = ProductListQuery::default().category("  Audio ");
        assert_eq!(query.category.as_deref(), Some("audio"));
        assert_eq!(query.is_new, None);
    }

    #[test]
    fn blank_criteria_impose_no_constraint() {
        let query = ProductListQuery::default().category("   ").search("");
        assert_eq!(query.category, None);
        assert_eq!(query.search, None);
    }
}
