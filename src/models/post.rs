use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::PublicUser;

/// Post row as stored in the posts table.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reaction row. At most one per (post, user) pair.
#[derive(Debug, Clone, FromRow)]
pub struct PostReaction {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub is_like: bool,
    pub created_at: DateTime<Utc>,
}

/// Post as exposed over the API, annotated with aggregate reaction counts
/// and the viewing user's own reaction (true = like, false = dislike,
/// absent = no reaction).
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: PublicUser,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub user_reaction: Option<bool>,
}
