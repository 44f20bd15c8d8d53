/// Follow repository - the directed follow edge set
use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

/// Idempotent edge insert; returns true if a new edge was created.
pub async fn insert(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        INSERT INTO follows (follower_id, following_id)
        VALUES ($1, $2)
        ON CONFLICT (follower_id, following_id) DO NOTHING
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Idempotent edge delete; returns true if an edge was removed.
pub async fn delete(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND following_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected > 0)
}

/// Membership test: does follower follow following?
pub async fn exists(pool: &PgPool, follower_id: Uuid, following_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM follows
            WHERE follower_id = $1 AND following_id = $2
        )
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_one(pool)
    .await
}

/// Batch membership test for annotating result lists.
/// Returns a map of user_id -> is_followed_by_follower.
pub async fn batch_exists(
    pool: &PgPool,
    follower_id: Uuid,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, bool>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let followed: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT following_id
        FROM follows
        WHERE follower_id = $1 AND following_id = ANY($2)
        "#,
    )
    .bind(follower_id)
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    let followed: HashSet<Uuid> = followed.into_iter().collect();
    Ok(user_ids
        .iter()
        .map(|id| (*id, followed.contains(id)))
        .collect())
}

/// Derived follower count (edges pointing at the user).
pub async fn count_followers(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE following_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Derived following count (edges leaving the user).
pub async fn count_following(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Batch follower counts for a set of users.
pub async fn batch_follower_counts(
    pool: &PgPool,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, i64>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT following_id, COUNT(*)
        FROM follows
        WHERE following_id = ANY($1)
        GROUP BY following_id
        "#,
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Batch following counts for a set of users.
pub async fn batch_following_counts(
    pool: &PgPool,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, i64>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT follower_id, COUNT(*)
        FROM follows
        WHERE follower_id = ANY($1)
        GROUP BY follower_id
        "#,
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Users the given user follows, newest edge first.
pub async fn list_following(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password_hash, u.name, u.surname,
               u.bio, u.profile_picture_url, u.created_at, u.updated_at
        FROM follows f
        JOIN users u ON u.id = f.following_id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Users following the given user, newest edge first.
pub async fn list_followers(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password_hash, u.name, u.surname,
               u.bio, u.profile_picture_url, u.created_at, u.updated_at
        FROM follows f
        JOIN users u ON u.id = f.follower_id
        WHERE f.following_id = $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
