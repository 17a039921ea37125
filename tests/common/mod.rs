//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::NamedTempFile;

use egadget_api::db::{DbPool, establish_connection_pool};
use egadget_api::domain::product::NewProduct;
use egadget_api::domain::user::{NewUser, User};
use egadget_api::repository::{DieselRepository, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Build a catalog product for seeding.
#[allow(dead_code)]
pub fn new_product(
    name: &str,
    price: f64,
    stock: i32,
    category: &str,
    is_new: bool,
    trending: bool,
) -> NewProduct {
    NewProduct {
        name: name.try_into().expect("valid product name"),
        description: format!("{name} description"),
        price: price.try_into().expect("valid price"),
        original_price: None,
        discount: 0.try_into().expect("valid discount"),
        stock: stock.try_into().expect("valid stock"),
        category: category.to_string(),
        images: vec!["/placeholder.svg".to_string()],
        is_new,
        trending,
    }
}

/// Create a user directly through the repository. The stored password is the
/// raw value given; route tests that need a real hash register over HTTP.
#[allow(dead_code)]
pub fn seed_user(repo: &DieselRepository, name: &str, email: &str, password: &str) -> User {
    repo.create_user(&NewUser {
        name: name.try_into().expect("valid user name"),
        email: email.try_into().expect("valid email"),
        password: password.to_string(),
    })
    .expect("should create user")
}
