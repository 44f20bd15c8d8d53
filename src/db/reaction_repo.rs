/// Reaction repository
///
/// The toggle sequence (read, then create/flip/delete) must not observe a
/// concurrent writer for the same (post, user) pair, so the row-level
/// operations take `&mut PgConnection` and run inside the service's
/// transaction. Aggregate reads take the pool directly.
use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::PostReaction;

const REACTION_COLUMNS: &str = "id, post_id, user_id, is_like, created_at";

/// Read the existing reaction for (post, user), locking the row until the
/// surrounding transaction commits.
pub async fn find_for_update(
    conn: &mut PgConnection,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Option<PostReaction>, sqlx::Error> {
    sqlx::query_as::<_, PostReaction>(&format!(
        r#"
        SELECT {REACTION_COLUMNS}
        FROM post_reactions
        WHERE post_id = $1 AND user_id = $2
        FOR UPDATE
        "#
    ))
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

/// Create a reaction. The upsert converges a concurrent first-reaction
/// that slipped past the locked read onto the single (post, user) row
/// instead of failing the transaction.
pub async fn insert(
    conn: &mut PgConnection,
    post_id: Uuid,
    user_id: Uuid,
    is_like: bool,
) -> Result<PostReaction, sqlx::Error> {
    sqlx::query_as::<_, PostReaction>(&format!(
        r#"
        INSERT INTO post_reactions (post_id, user_id, is_like)
        VALUES ($1, $2, $3)
        ON CONFLICT (post_id, user_id) DO UPDATE
        SET is_like = EXCLUDED.is_like
        RETURNING {REACTION_COLUMNS}
        "#
    ))
    .bind(post_id)
    .bind(user_id)
    .bind(is_like)
    .fetch_one(conn)
    .await
}

/// Flip an existing reaction's polarity in place.
pub async fn update_polarity(
    conn: &mut PgConnection,
    reaction_id: Uuid,
    is_like: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE post_reactions SET is_like = $1 WHERE id = $2")
        .bind(is_like)
        .bind(reaction_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Remove a reaction (toggle-off).
pub async fn delete(conn: &mut PgConnection, reaction_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_reactions WHERE id = $1")
        .bind(reaction_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Batch lookup of the viewing user's reactions across a page of posts.
/// Posts the user has not reacted to are absent from the map.
pub async fn batch_user_reactions(
    pool: &PgPool,
    user_id: Uuid,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, bool>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, bool)> = sqlx::query_as(
        r#"
        SELECT post_id, is_like
        FROM post_reactions
        WHERE user_id = $1 AND post_id = ANY($2)
        "#,
    )
    .bind(user_id)
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Batch aggregate counts across a page of posts.
/// Posts with no reactions are absent from the map.
pub async fn batch_counts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, (i64, i64)>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(Uuid, i64, i64)> = sqlx::query_as(
        r#"
        SELECT post_id,
               COUNT(*) FILTER (WHERE is_like),
               COUNT(*) FILTER (WHERE NOT is_like)
        FROM post_reactions
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, likes, dislikes)| (id, (likes, dislikes)))
        .collect())
}
