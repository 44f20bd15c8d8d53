use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

use social_api::routes::configure_routes;
use social_api::security::jwt::JwtKeys;
use social_api::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting social-api");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Configuration loaded: env={}, port={}",
        config.app.env, config.app.port
    );

    // Initialize database pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    // Verify database connection
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Failed to verify database connection")?;
    info!("Database pool created and verified");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let keys = JwtKeys::new(&config.auth.jwt_secret, config.auth.token_expiry_hours);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!("Starting HTTP server at {}", bind_address);

    let server_pool = pool.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let keys = keys.clone();
        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .app_data(web::Data::new(keys.clone()))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, &keys))
    })
    .bind(&bind_address)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    info!("social-api shutting down");
    Ok(())
}
