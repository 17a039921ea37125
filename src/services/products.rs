use crate::domain::product::Product;
use crate::domain::review::NewReview;
use crate::domain::types::{ProductId, Rating};
use crate::domain::user::User;
use crate::repository::{ProductListQuery, ProductReader, ReviewWriter};

use super::{ServiceError, ServiceResult};

/// List catalog products matching the supplied query. Zero matches is an
/// empty page, never an error.
pub fn list_products<R>(query: ProductListQuery, repo: &R) -> ServiceResult<(usize, Vec<Product>)>
where
    R: ProductReader,
{
    Ok(repo.list_products(query)?)
}

/// Fetch one product with its full review list.
pub fn get_product<R>(product_id: i32, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)
}

/// Append a review to a product on behalf of the authenticated user and
/// return the product with its recomputed average rating.
pub fn add_review<R>(
    product_id: i32,
    rating: i32,
    comment: String,
    user: &User,
    repo: &R,
) -> ServiceResult<Product>
where
    R: ProductReader + ReviewWriter,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;
    let rating = Rating::new(rating)?;

    Ok(repo.add_review(&NewReview {
        product_id,
        user_id: user.id,
        rating,
        comment,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::UserReader;
    use crate::repository::test::{TestRepository, sample_product, sample_user};

    fn seeded_repo() -> TestRepository {
        TestRepository::new(
            vec![sample_user(1, "Jane", "jane@example.com", "hash")],
            vec![
                sample_product(10, "Wireless Earbuds", 49.99, 5),
                sample_product(11, "Phone Stand", 9.99, 20),
            ],
        )
    }

    #[test]
    fn get_product_maps_missing_to_not_found() {
        let repo = seeded_repo();
        assert!(get_product(10, &repo).is_ok());
        assert_eq!(get_product(999, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(get_product(-1, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn add_review_updates_rating_to_exact_mean() {
        let repo = seeded_repo();
        let user = repo
            .get_user_by_email("jane@example.com")
            .unwrap()
            .unwrap();

        let product = add_review(10, 4, "Good".to_string(), &user, &repo).unwrap();
        assert_eq!(product.rating, 4.0);

        let product = add_review(10, 5, "Great".to_string(), &user, &repo).unwrap();
        assert_eq!(product.rating, 4.5);
        assert_eq!(product.reviews.len(), 2);
    }

    #[test]
    fn add_review_rejects_out_of_range_rating() {
        let repo = seeded_repo();
        let user = repo
            .get_user_by_email("jane@example.com")
            .unwrap()
            .unwrap();

        for rating in [0, 6, -3] {
            assert!(matches!(
                add_review(10, rating, String::new(), &user, &repo).unwrap_err(),
                ServiceError::Validation(_)
            ));
        }
    }

    #[test]
    fn add_review_to_missing_product_is_not_found() {
        let repo = seeded_repo();
        let user = repo
            .get_user_by_email("jane@example.com")
            .unwrap()
            .unwrap();

        assert_eq!(
            add_review(999, 4, String::new(), &user, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn list_products_with_no_matches_is_empty_not_error() {
        let repo = seeded_repo();
        let (total, products) =
            list_products(ProductListQuery::default().category("appliances"), &repo).unwrap();
        assert_eq!(total, 0);
        assert!(products.is_empty());
    }

    #[test]
    fn inverted_price_bounds_yield_empty_result() {
        let repo = seeded_repo();
        let (total, products) = list_products(
            ProductListQuery::default().min_price(50.0).max_price(10.0),
            &repo,
        )
        .unwrap();
        assert_eq!(total, 0);
        assert!(products.is_empty());
    }
}
