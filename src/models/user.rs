use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User row as stored in the users table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as exposed over the API. The password hash and email never leave
/// the service; follower counts are derived from the follows table at
/// read time.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_following: bool,
}

impl PublicUser {
    pub fn from_user(
        user: &User,
        followers_count: i64,
        following_count: i64,
        is_following: bool,
    ) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            bio: user.bio.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
            followers_count,
            following_count,
            is_following,
        }
    }
}
