//! SQLite connection pooling helpers.
//!
//! Every component receives the pool (or a repository wrapping it) by
//! reference; nothing reaches for a global connection handle.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Applies per-connection pragmas when a connection joins the pool.
///
/// WAL plus a busy timeout lets concurrent writers queue on the database
/// lock instead of failing immediately, which the immediate-transaction
/// cart mutations rely on.
#[derive(Debug)]
struct SqliteConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build a connection pool for the given SQLite database path or URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqliteConnectionOptions))
        .build(manager)
}
