/// User directory: profiles, partial updates, search
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{follow_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Page, PageParams, PublicUser, User};
use crate::security::password;

/// Partial profile update. Absent or empty fields are left untouched; a
/// non-empty password must clear the minimum length and is hashed before
/// storage.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The acting user's own profile.
    pub async fn get_profile(&self, actor: &User) -> Result<PublicUser> {
        let followers = follow_repo::count_followers(&self.pool, actor.id).await?;
        let following = follow_repo::count_following(&self.pool, actor.id).await?;
        Ok(PublicUser::from_user(actor, followers, following, false))
    }

    /// Another user's profile, annotated with whether the actor follows them.
    pub async fn get_user(&self, actor: &User, user_id: Uuid) -> Result<PublicUser> {
        let user = user_repo::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let followers = follow_repo::count_followers(&self.pool, user.id).await?;
        let following = follow_repo::count_following(&self.pool, user.id).await?;
        let is_following = follow_repo::exists(&self.pool, actor.id, user.id).await?;
        Ok(PublicUser::from_user(&user, followers, following, is_following))
    }

    /// Apply a partial profile update to the acting user.
    pub async fn update_user(&self, actor: &User, patch: UserPatch) -> Result<PublicUser> {
        let password_hash = match non_empty(patch.password.as_deref()) {
            Some(new_password) => Some(password::hash_password(new_password)?),
            None => None,
        };

        let updated = user_repo::update_profile(
            &self.pool,
            actor.id,
            non_empty(patch.name.as_deref()),
            non_empty(patch.surname.as_deref()),
            non_empty(patch.bio.as_deref()),
            non_empty(patch.profile_picture_url.as_deref()),
            password_hash.as_deref(),
        )
        .await?;

        self.get_profile(&updated).await
    }

    /// Delete the acting user's account. Posts, reactions and follow edges
    /// go with it.
    pub async fn delete_user(&self, actor: &User) -> Result<()> {
        user_repo::delete_user(&self.pool, actor.id).await?;
        Ok(())
    }

    /// Substring search across name, surname and username.
    pub async fn search(
        &self,
        actor: &User,
        term: &str,
        params: &PageParams,
    ) -> Result<Page<PublicUser>> {
        let users =
            user_repo::search_any(&self.pool, term, params.limit(), params.offset()).await?;
        let total = user_repo::count_search_any(&self.pool, term).await?;
        let views = compose_user_views(&self.pool, actor.id, &users).await?;
        Ok(Page::new(views, params, total))
    }

    /// Substring search against a single profile field.
    pub async fn search_by_field(
        &self,
        actor: &User,
        field: user_repo::SearchField,
        term: &str,
        params: &PageParams,
    ) -> Result<Page<PublicUser>> {
        let users =
            user_repo::search_by_field(&self.pool, field, term, params.limit(), params.offset())
                .await?;
        let total = user_repo::count_search_by_field(&self.pool, field, term).await?;
        let views = compose_user_views(&self.pool, actor.id, &users).await?;
        Ok(Page::new(views, params, total))
    }
}

/// Assemble API views for a list of users: derived counts plus whether the
/// viewer follows each one. Three batched queries regardless of list size.
pub(crate) async fn compose_user_views(
    pool: &PgPool,
    viewer_id: Uuid,
    users: &[User],
) -> Result<Vec<PublicUser>> {
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();

    let follower_counts = follow_repo::batch_follower_counts(pool, &ids).await?;
    let following_counts = follow_repo::batch_following_counts(pool, &ids).await?;
    let followed = follow_repo::batch_exists(pool, viewer_id, &ids).await?;

    Ok(users
        .iter()
        .map(|user| {
            PublicUser::from_user(
                user,
                follower_counts.get(&user.id).copied().unwrap_or(0),
                following_counts.get(&user.id).copied().unwrap_or(0),
                followed.get(&user.id).copied().unwrap_or(false),
            )
        })
        .collect())
}

/// Treat absent and empty strings alike: neither touches the stored value.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_filters_blank_fields() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("kept")), Some("kept"));
    }
}
