use std::collections::HashMap;

use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::product::{NewProduct, Product};
use crate::domain::review::{NewReview, Review};
use crate::domain::types::ProductId;
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::models::review::{NewReview as DbNewReview, Review as DbReview};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductSort, ProductWriter,
    RepositoryError, RepositoryResult, ReviewWriter, SortField,
};

/// Load the reviews for a whole result set in one query and attach them to
/// their products. One batched query instead of a per-product fetch; the
/// attached order is the store's insertion order.
fn attach_reviews(conn: &mut DbConnection, products: &mut [Product]) -> RepositoryResult<()> {
    use crate::schema::{reviews, users};

    if products.is_empty() {
        return Ok(());
    }

    let ids: Vec<i32> = products.iter().map(|p| p.id.get()).collect();
    let rows: Vec<(DbReview, String)> = reviews::table
        .inner_join(users::table)
        .filter(reviews::product_id.eq_any(&ids))
        .select((reviews::all_columns, users::name))
        .order(reviews::id.asc())
        .load(conn)?;

    let mut grouped: HashMap<i32, Vec<Review>> = HashMap::new();
    for (row, author_name) in rows {
        let product_id = row.product_id;
        grouped
            .entry(product_id)
            .or_default()
            .push(row.into_domain(author_name)?);
    }

    for product in products.iter_mut() {
        product.reviews = grouped.remove(&product.id.get()).unwrap_or_default();
    }

    Ok(())
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category) = &query.category {
                items = items.filter(products::category.eq(category.clone()));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .or(products::description.like(pattern)),
                );
            }
            if let Some(min_price) = query.min_price {
                items = items.filter(products::price.ge(min_price));
            }
            if let Some(max_price) = query.max_price {
                items = items.filter(products::price.le(max_price));
            }
            if let Some(is_new) = query.is_new {
                items = items.filter(products::is_new.eq(is_new));
            }
            if let Some(trending) = query.trending {
                items = items.filter(products::trending.eq(trending));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let items = query_builder();
        let items = match query.sort {
            Some(ProductSort {
                field: SortField::Price,
                descending,
            }) => {
                if descending {
                    items.order(products::price.desc())
                } else {
                    items.order(products::price.asc())
                }
            }
            Some(ProductSort {
                field: SortField::Rating,
                descending,
            }) => {
                if descending {
                    items.order(products::rating.desc())
                } else {
                    items.order(products::rating.asc())
                }
            }
            Some(ProductSort {
                field: SortField::CreatedAt,
                descending,
            }) => {
                if descending {
                    items.order(products::created_at.desc())
                } else {
                    items.order(products::created_at.asc())
                }
            }
            Some(ProductSort {
                field: SortField::Name,
                descending,
            }) => {
                if descending {
                    items.order(products::name.desc())
                } else {
                    items.order(products::name.asc())
                }
            }
            // Default ordering: newest first.
            None => items.order(products::id.desc()),
        };

        let rows = items
            .limit(query.limit)
            .offset(query.offset)
            .load::<DbProduct>(&mut conn)?;

        let mut result = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;
        attach_reviews(&mut conn, &mut result)?;

        Ok((total, result))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let row = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut result = vec![Product::try_from(row)?];
        attach_reviews(&mut conn, &mut result)?;

        Ok(result.pop())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let row: DbProduct = diesel::insert_into(products::table)
            .values(DbNewProduct::from(product))
            .get_result(&mut conn)?;

        Ok(Product::try_from(row)?)
    }
}

impl ReviewWriter for DieselRepository {
    fn add_review(&self, review: &NewReview) -> RepositoryResult<Product> {
        use crate::schema::{products, reviews};

        let mut conn = self.conn()?;

        // Insert and rating recompute are one transaction so the stored
        // average is always the exact mean of the stored reviews.
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let exists = products::table
                .find(review.product_id.get())
                .select(products::id)
                .first::<i32>(conn)
                .optional()?;
            if exists.is_none() {
                return Err(RepositoryError::NotFound);
            }

            diesel::insert_into(reviews::table)
                .values(DbNewReview::from(review))
                .execute(conn)?;

            let ratings: Vec<i32> = reviews::table
                .filter(reviews::product_id.eq(review.product_id.get()))
                .select(reviews::rating)
                .load(conn)?;
            let mean = ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64;

            diesel::update(products::table.find(review.product_id.get()))
                .set(products::rating.eq(mean))
                .execute(conn)?;

            Ok(())
        })?;

        self.get_product_by_id(review.product_id)?
            .ok_or(RepositoryError::NotFound)
    }
}
