use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::{CartLine, CartProduct};
use crate::domain::types::{
    CartItemId, DiscountPercent, ProductId, ProductName, ProductPrice, Quantity, Stock,
    TypeConstraintError,
};
use crate::models::product::{Product as DbProduct, decode_images};

/// Diesel representation of a cart line row.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CartItem {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

impl CartItem {
    /// Joins the line with its product row, computing the subtotal from the
    /// product's current price.
    pub fn into_domain(self, product: DbProduct) -> Result<CartLine, TypeConstraintError> {
        let quantity = Quantity::new(self.quantity)?;
        let subtotal = product.price * f64::from(quantity.get());
        Ok(CartLine {
            id: CartItemId::new(self.id)?,
            product: CartProduct {
                id: ProductId::new(product.id)?,
                name: ProductName::new(product.name)?,
                price: ProductPrice::new(product.price)?,
                original_price: product.original_price.map(ProductPrice::new).transpose()?,
                discount: DiscountPercent::new(product.discount)?,
                stock: Stock::new(product.stock)?,
                images: decode_images(&product.images),
                is_new: product.is_new,
                trending: product.trending,
                rating: product.rating,
            },
            quantity,
            subtotal,
            created_at: self.created_at,
        })
    }
}

/// Insertable cart line row.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem {
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}
