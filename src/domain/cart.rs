use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CartItemId, DiscountPercent, ProductId, ProductName, ProductPrice, Quantity, Stock,
};

/// One cart line joined with the referenced product's current fields.
///
/// `subtotal` is computed at view time from the product's current price,
/// never from a price snapshot taken when the line was added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartItemId,
    pub product: CartProduct,
    pub quantity: Quantity,
    pub subtotal: f64,
    pub created_at: NaiveDateTime,
}

/// Product fields a cart view exposes per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: ProductName,
    pub price: ProductPrice,
    pub original_price: Option<ProductPrice>,
    pub discount: DiscountPercent,
    pub stock: Stock,
    pub images: Vec<String>,
    pub is_new: bool,
    pub trending: bool,
    pub rating: f64,
}

/// A user's cart recomputed from its lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
    pub total: f64,
}

impl Cart {
    /// Builds a cart view from joined lines, summing subtotals.
    pub fn new(items: Vec<CartLine>) -> Self {
        let total = items.iter().map(|line| line.subtotal).sum();
        Self { items, total }
    }

    /// Number of lines in the cart (not the summed quantity).
    pub fn count(&self) -> usize {
        self.items.len()
    }
}
