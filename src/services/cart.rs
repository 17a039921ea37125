use crate::domain::cart::Cart;
use crate::domain::types::{CartItemId, ProductId, Quantity};
use crate::domain::user::User;
use crate::repository::{CartReader, CartWriter};

use super::{ServiceError, ServiceResult};

/// The user's current cart view. An absent cart is an empty view.
pub fn view_cart<R>(user: &User, repo: &R) -> ServiceResult<Cart>
where
    R: CartReader,
{
    Ok(repo.get_cart(user.id)?)
}

/// Add `quantity` of a product to the user's cart, merging with an existing
/// line for the same product, and return the recomputed view.
pub fn add_to_cart<R>(product_id: i32, quantity: i32, user: &User, repo: &R) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter,
{
    let product_id = ProductId::new(product_id).map_err(|_| ServiceError::NotFound)?;
    let quantity = Quantity::new(quantity)?;

    repo.add_item(user.id, product_id, quantity)?;
    Ok(repo.get_cart(user.id)?)
}

/// Overwrite a cart line's quantity and return the recomputed view.
pub fn update_cart_item<R>(
    item_id: i32,
    quantity: i32,
    user: &User,
    repo: &R,
) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter,
{
    let item_id = CartItemId::new(item_id).map_err(|_| ServiceError::NotFound)?;
    let quantity = Quantity::new(quantity)?;

    repo.set_item_quantity(user.id, item_id, quantity)?;
    Ok(repo.get_cart(user.id)?)
}

/// Remove a cart line owned by the user and return the recomputed view.
pub fn remove_from_cart<R>(item_id: i32, user: &User, repo: &R) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter,
{
    let item_id = CartItemId::new(item_id).map_err(|_| ServiceError::NotFound)?;

    repo.remove_item(user.id, item_id)?;
    Ok(repo.get_cart(user.id)?)
}

/// Delete every line in the user's cart. Never fails; returns the empty view.
pub fn clear_cart<R>(user: &User, repo: &R) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter,
{
    repo.clear_cart(user.id)?;
    Ok(repo.get_cart(user.id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::UserReader;
    use crate::repository::test::{TestRepository, sample_product, sample_user};

    fn seeded() -> (TestRepository, User) {
        let repo = TestRepository::new(
            vec![
                sample_user(1, "Jane", "jane@example.com", "hash"),
                sample_user(2, "Sam", "sam@example.com", "hash"),
            ],
            vec![
                sample_product(10, "Wireless Earbuds", 49.99, 5),
                sample_product(11, "Phone Stand", 10.0, 20),
            ],
        );
        let user = repo
            .get_user_by_email("jane@example.com")
            .unwrap()
            .unwrap();
        (repo, user)
    }

    #[test]
    fn duplicate_adds_merge_into_one_line() {
        let (repo, user) = seeded();

        let cart = add_to_cart(10, 2, &user, &repo).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity.get(), 2);

        let cart = add_to_cart(10, 3, &user, &repo).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity.get(), 5);
    }

    #[test]
    fn merged_quantity_may_not_exceed_stock() {
        let (repo, user) = seeded();

        // stock is 5: 3 then 3 must fail and leave the line at 3.
        add_to_cart(10, 3, &user, &repo).unwrap();
        assert_eq!(
            add_to_cart(10, 3, &user, &repo).unwrap_err(),
            ServiceError::InsufficientStock
        );

        let cart = view_cart(&user, &repo).unwrap();
        assert_eq!(cart.items[0].quantity.get(), 3);
    }

    #[test]
    fn add_validates_quantity_and_product() {
        let (repo, user) = seeded();

        assert!(matches!(
            add_to_cart(10, 0, &user, &repo).unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            add_to_cart(10, -2, &user, &repo).unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert_eq!(
            add_to_cart(999, 1, &user, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn set_quantity_is_absolute_and_stock_checked() {
        let (repo, user) = seeded();

        let cart = add_to_cart(10, 2, &user, &repo).unwrap();
        let item_id = cart.items[0].id.get();

        let cart = update_cart_item(item_id, 5, &user, &repo).unwrap();
        assert_eq!(cart.items[0].quantity.get(), 5);

        assert_eq!(
            update_cart_item(item_id, 6, &user, &repo).unwrap_err(),
            ServiceError::InsufficientStock
        );
        assert_eq!(
            update_cart_item(999, 1, &user, &repo).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn subtotal_uses_current_price_times_quantity() {
        let (repo, user) = seeded();

        let cart = add_to_cart(11, 3, &user, &repo).unwrap();
        assert_eq!(cart.items[0].subtotal, 30.0);
        assert_eq!(cart.total, 30.0);

        let item_id = cart.items[0].id.get();
        let cart = update_cart_item(item_id, 4, &user, &repo).unwrap();
        assert_eq!(cart.items[0].subtotal, 40.0);
        assert_eq!(cart.total, 40.0);
    }

    #[test]
    fn remove_requires_ownership() {
        let (repo, user) = seeded();
        let other = repo.get_user_by_email("sam@example.com").unwrap().unwrap();

        let cart = add_to_cart(10, 1, &user, &repo).unwrap();
        let item_id = cart.items[0].id.get();

        assert_eq!(
            remove_from_cart(item_id, &other, &repo).unwrap_err(),
            ServiceError::NotFound
        );
        let cart = remove_from_cart(item_id, &user, &repo).unwrap();
        assert!(cart.items.is_empty());
    }

    #[test]
    fn clear_yields_empty_view_and_never_fails() {
        let (repo, user) = seeded();

        add_to_cart(10, 1, &user, &repo).unwrap();
        add_to_cart(11, 2, &user, &repo).unwrap();

        let cart = clear_cart(&user, &repo).unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0.0);
        assert_eq!(cart.count(), 0);

        // Clearing an already-empty cart still succeeds.
        let cart = clear_cart(&user, &repo).unwrap();
        assert!(cart.items.is_empty());
    }
}
