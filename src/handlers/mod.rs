/// HTTP request handlers
pub mod auth;
pub mod feed;
pub mod health;
pub mod posts;
pub mod users;

use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::Identity;
use crate::models::User;

/// Resolve the acting user from the request's identity claim, fresh from
/// the store on every call. A token whose account has since been deleted
/// is rejected here.
pub(crate) async fn current_user(pool: &PgPool, identity: &Identity) -> Result<User> {
    user_repo::find_by_email(pool, &identity.0)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Current user not found".to_string()))
}
