use diesel::prelude::*;

use crate::domain::cart::{Cart, CartLine};
use crate::domain::types::{CartItemId, ProductId, Quantity, UserId};
use crate::models::cart::{CartItem as DbCartItem, NewCartItem};
use crate::models::product::Product as DbProduct;
use crate::repository::{
    CartReader, CartWriter, DieselRepository, RepositoryError, RepositoryResult,
};

impl CartReader for DieselRepository {
    fn get_cart(&self, user_id: UserId) -> RepositoryResult<Cart> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;

        let rows: Vec<(DbCartItem, DbProduct)> = cart_items::table
            .inner_join(products::table)
            .filter(cart_items::user_id.eq(user_id.get()))
            .order(cart_items::id.asc())
            .load(&mut conn)?;

        let lines = rows
            .into_iter()
            .map(|(item, product)| item.into_domain(product))
            .collect::<Result<Vec<CartLine>, _>>()?;

        Ok(Cart::new(lines))
    }
}

impl CartWriter for DieselRepository {
    fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> RepositoryResult<()> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;

        // The immediate transaction takes the database write lock before the
        // stock read, so two concurrent adds serialize and cannot both pass
        // the check against the same remaining stock.
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let stock = products::table
                .find(product_id.get())
                .select(products::stock)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let existing: Option<(i32, i32)> = cart_items::table
                .filter(cart_items::user_id.eq(user_id.get()))
                .filter(cart_items::product_id.eq(product_id.get()))
                .select((cart_items::id, cart_items::quantity))
                .first(conn)
                .optional()?;

            match existing {
                Some((item_id, current)) => {
                    let new_quantity = current + quantity.get();
                    if new_quantity > stock {
                        return Err(RepositoryError::InsufficientStock);
                    }
                    diesel::update(cart_items::table.find(item_id))
                        .set(cart_items::quantity.eq(new_quantity))
                        .execute(conn)?;
                }
                None => {
                    if quantity.get() > stock {
                        return Err(RepositoryError::InsufficientStock);
                    }
                    diesel::insert_into(cart_items::table)
                        .values(NewCartItem {
                            user_id: user_id.get(),
                            product_id: product_id.get(),
                            quantity: quantity.get(),
                        })
                        .execute(conn)?;
                }
            }

            Ok(())
        })
    }

    fn set_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: Quantity,
    ) -> RepositoryResult<()> {
        use crate::schema::{cart_items, products};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let stock = cart_items::table
                .inner_join(products::table)
                .filter(cart_items::id.eq(item_id.get()))
                .filter(cart_items::user_id.eq(user_id.get()))
                .select(products::stock)
                .first::<i32>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            if quantity.get() > stock {
                return Err(RepositoryError::InsufficientStock);
            }

            diesel::update(cart_items::table.find(item_id.get()))
                .set(cart_items::quantity.eq(quantity.get()))
                .execute(conn)?;

            Ok(())
        })
    }

    fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> RepositoryResult<()> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            cart_items::table
                .filter(cart_items::id.eq(item_id.get()))
                .filter(cart_items::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn clear_cart(&self, user_id: UserId) -> RepositoryResult<usize> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;

        Ok(
            diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id.get())))
                .execute(&mut conn)?,
        )
    }
}
