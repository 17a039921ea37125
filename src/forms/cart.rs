use serde::Deserialize;
use validator::Validate;

/// Body for adding a product to the cart.
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartForm {
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Body for overwriting a cart line's quantity.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItemForm {
    #[validate(range(min = 1))]
    pub quantity: i32,
}
