use serde::Serialize;

use crate::domain::cart::{Cart, CartLine, CartProduct};

/// Cart view response: `{items, total, count}`.
#[derive(Debug, Clone, Serialize)]
pub struct CartDto {
    pub items: Vec<CartItemDto>,
    pub total: f64,
    pub count: usize,
}

impl From<Cart> for CartDto {
    fn from(cart: Cart) -> Self {
        Self {
            count: cart.count(),
            total: cart.total,
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartItemDto {
    pub id: i32,
    pub product: CartProductDto,
    pub quantity: i32,
    pub subtotal: f64,
}

impl From<CartLine> for CartItemDto {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id.get(),
            quantity: line.quantity.get(),
            subtotal: line.subtotal,
            product: line.product.into(),
        }
    }
}

/// Product summary embedded in a cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProductDto {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: i32,
    pub stock: i32,
    pub images: Vec<String>,
    pub is_new: bool,
    pub trending: bool,
    pub rating: f64,
}

impl From<CartProduct> for CartProductDto {
    fn from(product: CartProduct) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.into_inner(),
            price: product.price.get(),
            original_price: product.original_price.map(|p| p.get()),
            discount: product.discount.get(),
            stock: product.stock.get(),
            images: product.images,
            is_new: product.is_new,
            trending: product.trending,
            rating: product.rating,
        }
    }
}
