/// Social API library
///
/// A social-networking backend: posts, likes/dislikes, follow/unfollow,
/// user search and feeds over HTTP, backed by PostgreSQL.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Row structs and response views
/// - `services`: Business logic layer
/// - `db`: Database access layer (repositories)
/// - `middleware`: Bearer-token authentication
/// - `security`: Password hashing and JWT helpers
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
