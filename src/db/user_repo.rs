/// User repository - handles all database operations for users
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

const USER_COLUMNS: &str = "id, username, email, password_hash, name, surname, bio, profile_picture_url, created_at, updated_at";

/// Create a new user in the database
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    name: &str,
    surname: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, email, password_hash, name, surname)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(username)
    .bind(email.to_lowercase())
    .bind(password_hash)
    .bind(name)
    .bind(surname)
    .fetch_one(pool)
    .await
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Batch lookup by ID (page authors, etc.)
pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await
}

/// Find a user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await
}

/// Apply a partial profile update in a single statement. Fields passed as
/// `None` are untouched; the operation is all-or-nothing.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    name: Option<&str>,
    surname: Option<&str>,
    bio: Option<&str>,
    profile_picture_url: Option<&str>,
    password_hash: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            surname = COALESCE($3, surname),
            bio = COALESCE($4, bio),
            profile_picture_url = COALESCE($5, profile_picture_url),
            password_hash = COALESCE($6, password_hash),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(name)
    .bind(surname)
    .bind(bio)
    .bind(profile_picture_url)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

/// Delete a user. Owned posts, reactions and follow edges cascade.
pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Case-insensitive substring search across name, surname and username
pub async fn search_any(
    pool: &PgPool,
    term: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = like_pattern(term);
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE name ILIKE $1 OR surname ILIKE $1 OR username ILIKE $1
        ORDER BY username
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_search_any(pool: &PgPool, term: &str) -> Result<i64, sqlx::Error> {
    let pattern = like_pattern(term);
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM users WHERE name ILIKE $1 OR surname ILIKE $1 OR username ILIKE $1",
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await
}

/// The user fields that support single-field substring search.
#[derive(Debug, Clone, Copy)]
pub enum SearchField {
    Name,
    Surname,
    Username,
}

impl SearchField {
    fn column(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Surname => "surname",
            SearchField::Username => "username",
        }
    }
}

/// Case-insensitive substring search against a single field
pub async fn search_by_field(
    pool: &PgPool,
    field: SearchField,
    term: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = like_pattern(term);
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE {col} ILIKE $1
        ORDER BY username
        LIMIT $2 OFFSET $3
        "#,
        col = field.column()
    ))
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_search_by_field(
    pool: &PgPool,
    field: SearchField,
    term: &str,
) -> Result<i64, sqlx::Error> {
    let pattern = like_pattern(term);
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM users WHERE {col} ILIKE $1",
        col = field.column()
    ))
    .bind(&pattern)
    .fetch_one(pool)
    .await
}

/// Build an ILIKE pattern for substring match, escaping the wildcard
/// characters so user input is matched literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_plain() {
        assert_eq!(like_pattern("alice"), "%alice%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
