/// Post lifecycle and the like/dislike toggle
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{post_repo, reaction_repo};
use crate::error::{AppError, Result};
use crate::models::{Post, PostView, User};
use crate::services::feed::compose_post_views;

/// Partial post update. Absent or empty fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// The reaction state machine: no reaction -> create; same polarity ->
/// remove (un-react); different polarity -> flip in place.
fn next_reaction_state(existing: Option<bool>, submitted: bool) -> Option<bool> {
    match existing {
        None => Some(submitted),
        Some(polarity) if polarity == submitted => None,
        Some(_) => Some(submitted),
    }
}

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post owned by the acting user.
    pub async fn create_post(&self, actor: &User, title: &str, content: &str) -> Result<PostView> {
        let post = post_repo::create_post(&self.pool, actor.id, title, content).await?;
        self.post_view(actor.id, &post).await
    }

    /// A single post, annotated with the actor's reaction.
    pub async fn get_post(&self, actor: &User, post_id: Uuid) -> Result<PostView> {
        let post = self.find_post(post_id).await?;
        self.post_view(actor.id, &post).await
    }

    /// Apply a partial update. Only the author may update a post.
    pub async fn update_post(
        &self,
        actor: &User,
        post_id: Uuid,
        patch: PostPatch,
    ) -> Result<PostView> {
        let post = self.find_post(post_id).await?;

        if post.author_id != actor.id {
            return Err(AppError::Forbidden(
                "You can only update your own posts".to_string(),
            ));
        }

        let updated = post_repo::update_post(
            &self.pool,
            post.id,
            non_empty(patch.title.as_deref()),
            non_empty(patch.content.as_deref()),
        )
        .await?;

        self.post_view(actor.id, &updated).await
    }

    /// Delete a post and its reactions. Only the author may delete.
    pub async fn delete_post(&self, actor: &User, post_id: Uuid) -> Result<()> {
        let post = self.find_post(post_id).await?;

        if post.author_id != actor.id {
            return Err(AppError::Forbidden(
                "You can only delete your own posts".to_string(),
            ));
        }

        post_repo::delete_post(&self.pool, post.id).await?;
        Ok(())
    }

    /// Submit a like (`is_like = true`) or dislike (`is_like = false`).
    ///
    /// The read-check-write sequence runs in one transaction with the
    /// existing row locked, so concurrent submissions from the same user
    /// serialize; the (post, user) uniqueness constraint rules out a
    /// second row regardless.
    pub async fn react_to_post(
        &self,
        actor: &User,
        post_id: Uuid,
        is_like: bool,
    ) -> Result<PostView> {
        let post = self.find_post(post_id).await?;

        let mut tx = self.pool.begin().await?;

        let existing = reaction_repo::find_for_update(&mut *tx, post.id, actor.id).await?;
        let next = next_reaction_state(existing.as_ref().map(|r| r.is_like), is_like);

        match (existing, next) {
            (None, Some(polarity)) => {
                reaction_repo::insert(&mut *tx, post.id, actor.id, polarity).await?;
            }
            (Some(reaction), None) => {
                reaction_repo::delete(&mut *tx, reaction.id).await?;
            }
            (Some(reaction), Some(polarity)) => {
                reaction_repo::update_polarity(&mut *tx, reaction.id, polarity).await?;
            }
            (None, None) => {}
        }

        tx.commit().await?;

        self.post_view(actor.id, &post).await
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    async fn post_view(&self, viewer_id: Uuid, post: &Post) -> Result<PostView> {
        let views =
            compose_post_views(&self.pool, viewer_id, std::slice::from_ref(post)).await?;
        views
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("empty view composition".to_string()))
    }
}

/// Treat absent and empty strings alike: neither touches the stored value.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reaction_creates() {
        assert_eq!(next_reaction_state(None, true), Some(true));
        assert_eq!(next_reaction_state(None, false), Some(false));
    }

    #[test]
    fn test_same_polarity_removes() {
        assert_eq!(next_reaction_state(Some(true), true), None);
        assert_eq!(next_reaction_state(Some(false), false), None);
    }

    #[test]
    fn test_opposite_polarity_flips() {
        assert_eq!(next_reaction_state(Some(true), false), Some(false));
        assert_eq!(next_reaction_state(Some(false), true), Some(true));
    }

    /// Like twice = back to no reaction; like, dislike, dislike = back to
    /// no reaction. Replaying the toggle law over any sequence leaves at
    /// most one reaction per (post, user).
    #[test]
    fn test_toggle_law_sequences() {
        let mut state: Option<bool> = None;
        for &submit in &[true, true] {
            state = next_reaction_state(state, submit);
        }
        assert_eq!(state, None);

        let mut state: Option<bool> = None;
        for &submit in &[true, false, false] {
            state = next_reaction_state(state, submit);
        }
        assert_eq!(state, None);

        let mut state: Option<bool> = None;
        for &submit in &[true, false] {
            state = next_reaction_state(state, submit);
        }
        assert_eq!(state, Some(false));
    }

    #[test]
    fn test_patch_non_empty() {
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("Title")), Some("Title"));
        assert_eq!(non_empty(None), None);
    }
}
