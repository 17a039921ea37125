use std::env;

use actix_web::{App, HttpServer, web};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use egadget_api::db::establish_connection_pool;
use egadget_api::models::config::ServerConfig;
use egadget_api::repository::DieselRepository;
use egadget_api::routes;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "egadget.db".to_string());
    let secret_key = env::var("SECRET_KEY").expect("SECRET_KEY must be set");
    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let token_ttl_secs = env::var("TOKEN_TTL_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(86_400);

    let pool = establish_connection_pool(&database_url)
        .expect("Failed to establish SQLite connection pool");
    {
        let mut conn = pool.get().expect("Failed to get SQLite connection from pool");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run pending migrations");
    }

    let repo = DieselRepository::new(pool);
    let config = ServerConfig {
        secret_key,
        token_ttl_secs,
    };

    log::info!("Starting eGadget API server on {bind_address}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
