use std::sync::Mutex;

use chrono::Utc;

use crate::domain::cart::{Cart, CartLine, CartProduct};
use crate::domain::product::{NewProduct, Product};
use crate::domain::review::{NewReview, Review, ReviewAuthor};
use crate::domain::types::{CartItemId, ProductId, Quantity, ReviewId, UserId};
use crate::domain::user::{NewUser, User};
use crate::repository::{
    CartReader, CartWriter, ProductListQuery, ProductReader, ProductSort, ProductWriter,
    RepositoryError, RepositoryResult, ReviewWriter, SortField, UserReader, UserWriter,
};

#[derive(Debug, Clone)]
struct StoredCartLine {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    created_at: chrono::NaiveDateTime,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    products: Vec<Product>,
    cart: Vec<StoredCartLine>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory repository used for unit tests. Mirrors the SQLite
/// implementation's semantics, including cart merge and stock checks.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    pub fn new(users: Vec<User>, products: Vec<Product>) -> Self {
        let next_id = users
            .iter()
            .map(|u| u.id.get())
            .chain(products.iter().map(|p| p.id.get()))
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(State {
                users,
                products,
                cart: Vec::new(),
                next_id,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("test repository lock poisoned")
    }
}

/// Build a minimal catalog product for tests.
pub fn sample_product(id: i32, name: &str, price: f64, stock: i32) -> Product {
    Product {
        id: ProductId::new(id).expect("valid product id"),
        name: name.try_into().expect("valid product name"),
        description: String::new(),
        price: price.try_into().expect("valid price"),
        original_price: None,
        discount: 0.try_into().expect("valid discount"),
        stock: stock.try_into().expect("valid stock"),
        category: "gadgets".to_string(),
        images: Vec::new(),
        is_new: false,
        trending: false,
        rating: 0.0,
        created_at: Utc::now().naive_utc(),
        reviews: Vec::new(),
    }
}

/// Build a registered user for tests. `password` is stored as given.
pub fn sample_user(id: i32, name: &str, email: &str, password: &str) -> User {
    User {
        id: UserId::new(id).expect("valid user id"),
        name: name.try_into().expect("valid user name"),
        email: email.try_into().expect("valid email"),
        password: password.to_string(),
        created_at: Utc::now().naive_utc(),
    }
}

impl ProductReader for TestRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let state = self.lock();
        let mut items: Vec<Product> = state.products.clone();

        if let Some(category) = &query.category {
            items.retain(|p| p.category == *category);
        }
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            items.retain(|p| {
                p.name.as_str().to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            });
        }
        if let Some(min_price) = query.min_price {
            items.retain(|p| p.price.get() >= min_price);
        }
        if let Some(max_price) = query.max_price {
            items.retain(|p| p.price.get() <= max_price);
        }
        if let Some(is_new) = query.is_new {
            items.retain(|p| p.is_new == is_new);
        }
        if let Some(trending) = query.trending {
            items.retain(|p| p.trending == trending);
        }

        match query.sort {
            Some(ProductSort { field, descending }) => {
                items.sort_by(|a, b| {
                    let ordering = match field {
                        SortField::Price => a
                            .price
                            .get()
                            .partial_cmp(&b.price.get())
                            .unwrap_or(std::cmp::Ordering::Equal),
                        SortField::Rating => a
                            .rating
                            .partial_cmp(&b.rating)
                            .unwrap_or(std::cmp::Ordering::Equal),
                        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                        SortField::Name => a.name.as_str().cmp(b.name.as_str()),
                    };
                    if descending { ordering.reverse() } else { ordering }
                });
            }
            None => items.sort_by(|a, b| b.id.cmp(&a.id)),
        }

        let total = items.len();
        let items = items
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect();

        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.lock();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }
}

impl ProductWriter for TestRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        let mut state = self.lock();
        let id = state.next_id();
        let created = Product {
            id: ProductId::new(id)?,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            original_price: product.original_price,
            discount: product.discount,
            stock: product.stock,
            category: product.category.clone(),
            images: product.images.clone(),
            is_new: product.is_new,
            trending: product.trending,
            rating: 0.0,
            created_at: Utc::now().naive_utc(),
            reviews: Vec::new(),
        };
        state.products.push(created.clone());
        Ok(created)
    }
}

impl ReviewWriter for TestRepository {
    fn add_review(&self, review: &NewReview) -> RepositoryResult<Product> {
        let mut state = self.lock();

        let author_name = state
            .users
            .iter()
            .find(|u| u.id == review.user_id)
            .map(|u| u.name.as_str().to_string())
            .unwrap_or_default();

        let review_id = state.next_id();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == review.product_id)
            .ok_or(RepositoryError::NotFound)?;

        product.reviews.push(Review {
            id: ReviewId::new(review_id)?,
            rating: review.rating,
            comment: review.comment.clone(),
            author: ReviewAuthor {
                id: review.user_id,
                name: author_name,
            },
            created_at: Utc::now().naive_utc(),
        });
        product.rating = product
            .reviews
            .iter()
            .map(|r| f64::from(r.rating.get()))
            .sum::<f64>()
            / product.reviews.len() as f64;

        Ok(product.clone())
    }
}

impl UserReader for TestRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let state = self.lock();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let state = self.lock();
        Ok(state.users.iter().find(|u| u.email.as_str() == email).cloned())
    }
}

impl UserWriter for TestRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(
                "UNIQUE constraint failed: users.email".to_string(),
            ));
        }
        let id = state.next_id();
        let created = User {
            id: UserId::new(id)?,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            created_at: Utc::now().naive_utc(),
        };
        state.users.push(created.clone());
        Ok(created)
    }
}

impl CartReader for TestRepository {
    fn get_cart(&self, user_id: UserId) -> RepositoryResult<Cart> {
        let state = self.lock();
        let mut lines = Vec::new();
        for stored in state.cart.iter().filter(|l| l.user_id == user_id.get()) {
            let product = state
                .products
                .iter()
                .find(|p| p.id.get() == stored.product_id)
                .ok_or(RepositoryError::NotFound)?;
            let quantity = Quantity::new(stored.quantity)?;
            lines.push(CartLine {
                id: CartItemId::new(stored.id)?,
                product: CartProduct {
                    id: product.id,
                    name: product.name.clone(),
                    price: product.price,
                    original_price: product.original_price,
                    discount: product.discount,
                    stock: product.stock,
                    images: product.images.clone(),
                    is_new: product.is_new,
                    trending: product.trending,
                    rating: product.rating,
                },
                quantity,
                subtotal: product.price.get() * f64::from(quantity.get()),
                created_at: stored.created_at,
            });
        }
        Ok(Cart::new(lines))
    }
}

impl CartWriter for TestRepository {
    fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> RepositoryResult<()> {
        let mut state = self.lock();

        let stock = state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.stock.get())
            .ok_or(RepositoryError::NotFound)?;

        let id = state.next_id();
        let existing = state
            .cart
            .iter_mut()
            .find(|l| l.user_id == user_id.get() && l.product_id == product_id.get());

        match existing {
            Some(line) => {
                let new_quantity = line.quantity + quantity.get();
                if new_quantity > stock {
                    return Err(RepositoryError::InsufficientStock);
                }
                line.quantity = new_quantity;
            }
            None => {
                if quantity.get() > stock {
                    return Err(RepositoryError::InsufficientStock);
                }
                state.cart.push(StoredCartLine {
                    id,
                    user_id: user_id.get(),
                    product_id: product_id.get(),
                    quantity: quantity.get(),
                    created_at: Utc::now().naive_utc(),
                });
            }
        }

        Ok(())
    }

    fn set_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: Quantity,
    ) -> RepositoryResult<()> {
        let mut state = self.lock();

        let product_id = state
            .cart
            .iter()
            .find(|l| l.id == item_id.get() && l.user_id == user_id.get())
            .map(|l| l.product_id)
            .ok_or(RepositoryError::NotFound)?;
        let stock = state
            .products
            .iter()
            .find(|p| p.id.get() == product_id)
            .map(|p| p.stock.get())
            .ok_or(RepositoryError::NotFound)?;

        if quantity.get() > stock {
            return Err(RepositoryError::InsufficientStock);
        }

        if let Some(line) = state.cart.iter_mut().find(|l| l.id == item_id.get()) {
            line.quantity = quantity.get();
        }

        Ok(())
    }

    fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> RepositoryResult<()> {
        let mut state = self.lock();
        let before = state.cart.len();
        state
            .cart
            .retain(|l| !(l.id == item_id.get() && l.user_id == user_id.get()));
        if state.cart.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn clear_cart(&self, user_id: UserId) -> RepositoryResult<usize> {
        let mut state = self.lock();
        let before = state.cart.len();
        state.cart.retain(|l| l.user_id != user_id.get());
        Ok(before - state.cart.len())
    }
}
