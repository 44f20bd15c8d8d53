/// Feed composition: paginated post listings annotated for the viewer
use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{post_repo, reaction_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Page, PageParams, Post, PostView, User};
use crate::services::users::compose_user_views;

#[derive(Clone)]
pub struct FeedService {
    pool: PgPool,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Posts authored by the given user, newest first.
    pub async fn user_posts(
        &self,
        actor: &User,
        user_id: Uuid,
        params: &PageParams,
    ) -> Result<Page<PostView>> {
        let posts =
            post_repo::list_by_author(&self.pool, user_id, params.limit(), params.offset())
                .await?;
        let total = post_repo::count_by_author(&self.pool, user_id).await?;
        let views = compose_post_views(&self.pool, actor.id, &posts).await?;
        Ok(Page::new(views, params, total))
    }

    /// Posts authored by anyone in the actor's following set, newest
    /// first. An empty following set yields an empty page, never the
    /// explore set.
    pub async fn feed_posts(&self, actor: &User, params: &PageParams) -> Result<Page<PostView>> {
        let posts =
            post_repo::list_feed(&self.pool, actor.id, params.limit(), params.offset()).await?;
        let total = post_repo::count_feed(&self.pool, actor.id).await?;
        let views = compose_post_views(&self.pool, actor.id, &posts).await?;
        Ok(Page::new(views, params, total))
    }

    /// All posts, newest first, no personalization filter.
    pub async fn explore_posts(&self, actor: &User, params: &PageParams) -> Result<Page<PostView>> {
        let posts = post_repo::list_all(&self.pool, params.limit(), params.offset()).await?;
        let total = post_repo::count_all(&self.pool).await?;
        let views = compose_post_views(&self.pool, actor.id, &posts).await?;
        Ok(Page::new(views, params, total))
    }
}

/// Assemble API views for a page of posts: author profiles, aggregate
/// reaction counts and the viewer's own reaction, each resolved with one
/// batched query across the whole page rather than per post.
pub(crate) async fn compose_post_views(
    pool: &PgPool,
    viewer_id: Uuid,
    posts: &[Post],
) -> Result<Vec<PostView>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

    let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let counts = reaction_repo::batch_counts(pool, &post_ids).await?;
    let viewer_reactions = reaction_repo::batch_user_reactions(pool, viewer_id, &post_ids).await?;

    let authors = user_repo::find_by_ids(pool, &author_ids).await?;
    let author_views = compose_user_views(pool, viewer_id, &authors).await?;
    let author_views: HashMap<Uuid, _> = author_views.into_iter().map(|v| (v.id, v)).collect();

    posts
        .iter()
        .map(|post| {
            let author = author_views
                .get(&post.author_id)
                .cloned()
                .ok_or_else(|| AppError::Internal("post author missing".to_string()))?;
            let (likes, dislikes) = counts.get(&post.id).copied().unwrap_or((0, 0));

            Ok(PostView {
                id: post.id,
                title: post.title.clone(),
                content: post.content.clone(),
                author,
                created_at: post.created_at,
                updated_at: post.updated_at,
                likes_count: likes,
                dislikes_count: dislikes,
                user_reaction: viewer_reactions.get(&post.id).copied(),
            })
        })
        .collect()
}
