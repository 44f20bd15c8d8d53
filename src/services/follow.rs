/// Social graph: follow/unfollow and the derived listings
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Page, PageParams, PublicUser, User};
use crate::services::users::compose_user_views;

#[derive(Clone)]
pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add the target to the actor's following set. Idempotent: following
    /// an already-followed user changes nothing.
    pub async fn follow(&self, actor: &User, target_id: Uuid) -> Result<PublicUser> {
        if actor.id == target_id {
            return Err(AppError::SelfFollow);
        }

        let target = user_repo::find_by_id(&self.pool, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        follow_repo::insert(&self.pool, actor.id, target.id).await?;

        self.user_view(actor.id, &target).await
    }

    /// Remove the target from the actor's following set. A no-op when the
    /// edge does not exist.
    pub async fn unfollow(&self, actor: &User, target_id: Uuid) -> Result<PublicUser> {
        let target = user_repo::find_by_id(&self.pool, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        follow_repo::delete(&self.pool, actor.id, target.id).await?;

        self.user_view(actor.id, &target).await
    }

    /// Membership test against the directed edge set.
    pub async fn is_following(&self, actor_id: Uuid, other_id: Uuid) -> Result<bool> {
        Ok(follow_repo::exists(&self.pool, actor_id, other_id).await?)
    }

    /// Users the given user follows, annotated relative to the actor.
    pub async fn following(
        &self,
        actor: &User,
        user_id: Uuid,
        params: &PageParams,
    ) -> Result<Page<PublicUser>> {
        self.ensure_exists(user_id).await?;

        let users =
            follow_repo::list_following(&self.pool, user_id, params.limit(), params.offset())
                .await?;
        let total = follow_repo::count_following(&self.pool, user_id).await?;
        let views = compose_user_views(&self.pool, actor.id, &users).await?;
        Ok(Page::new(views, params, total))
    }

    /// Users following the given user, annotated relative to the actor.
    pub async fn followers(
        &self,
        actor: &User,
        user_id: Uuid,
        params: &PageParams,
    ) -> Result<Page<PublicUser>> {
        self.ensure_exists(user_id).await?;

        let users =
            follow_repo::list_followers(&self.pool, user_id, params.limit(), params.offset())
                .await?;
        let total = follow_repo::count_followers(&self.pool, user_id).await?;
        let views = compose_user_views(&self.pool, actor.id, &users).await?;
        Ok(Page::new(views, params, total))
    }

    async fn ensure_exists(&self, user_id: Uuid) -> Result<()> {
        user_repo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(())
    }

    async fn user_view(&self, viewer_id: Uuid, user: &User) -> Result<PublicUser> {
        let views = compose_user_views(&self.pool, viewer_id, std::slice::from_ref(user)).await?;
        views
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("empty view composition".to_string()))
    }
}
