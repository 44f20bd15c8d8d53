/// Post repository - handles all database operations for posts
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Post;

const POST_COLUMNS: &str = "id, author_id, title, content, created_at, updated_at";

/// Create a new post owned by the given author
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        INSERT INTO posts (author_id, title, content)
        VALUES ($1, $2, $3)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(author_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Apply a partial update. Fields passed as `None` are untouched.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        UPDATE posts
        SET title = COALESCE($2, title),
            content = COALESCE($3, content),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(post_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Delete a post. Its reactions cascade.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Posts authored by a user, newest first
pub async fn list_by_author(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        WHERE author_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await
}

/// Posts authored by anyone the given user follows, newest first
pub async fn list_feed(
    pool: &PgPool,
    follower_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        WHERE author_id IN (SELECT following_id FROM follows WHERE follower_id = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(follower_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_feed(pool: &PgPool, follower_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM posts
        WHERE author_id IN (SELECT following_id FROM follows WHERE follower_id = $1)
        "#,
    )
    .bind(follower_id)
    .fetch_one(pool)
    .await
}

/// All posts, newest first (explore)
pub async fn list_all(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}
