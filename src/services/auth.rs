/// Registration and login: the minimal pieces needed to mint the identity
/// claim every other endpoint resolves the acting user from.
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::PublicUser;
use crate::security::jwt::JwtKeys;
use crate::security::password;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    keys: JwtKeys,
}

/// A freshly issued access token.
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

impl AuthService {
    pub fn new(pool: PgPool, keys: JwtKeys) -> Self {
        Self { pool, keys }
    }

    /// Create a new account. Duplicate username or email surfaces as a
    /// conflict rather than a database error.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        raw_password: &str,
        name: &str,
        surname: &str,
    ) -> Result<PublicUser> {
        let password_hash = password::hash_password(raw_password)?;

        let user = user_repo::create_user(
            &self.pool,
            username,
            email,
            &password_hash,
            name,
            surname,
        )
        .await
        .map_err(map_unique_violation)?;

        Ok(PublicUser::from_user(&user, 0, 0, false))
    }

    /// Verify credentials and issue an access token carrying the email
    /// claim.
    pub async fn login(&self, email: &str, raw_password: &str) -> Result<IssuedToken> {
        let user = user_repo::find_by_email(&self.pool, email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !password::verify_password(raw_password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let access_token = self.keys.generate_token(&user.email)?;
        Ok(IssuedToken {
            access_token,
            expires_in: self.keys.expires_in_seconds(),
        })
    }

}

fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return AppError::Conflict("Username or email already in use".to_string());
        }
    }
    AppError::Database(err)
}
