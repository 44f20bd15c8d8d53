/// User handlers - profiles, search, follow graph
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo::SearchField;
use crate::error::Result;
use crate::handlers::current_user;
use crate::middleware::Identity;
use crate::models::PageParams;
use crate::services::{FollowService, UserPatch, UserService};

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SurnameQuery {
    pub surname: String,
}

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

/// GET /api/v1/users/me
pub async fn get_me(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());
    let profile = service.get_profile(&actor).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/v1/users/me
pub async fn update_me(
    pool: web::Data<PgPool>,
    identity: Identity,
    req: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());

    let req = req.into_inner();
    let patch = UserPatch {
        name: req.name,
        surname: req.surname,
        bio: req.bio,
        profile_picture_url: req.profile_picture_url,
        password: req.password,
    };
    let profile = service.update_user(&actor, patch).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// DELETE /api/v1/users/me
pub async fn delete_me(pool: web::Data<PgPool>, identity: Identity) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());
    service.delete_user(&actor).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    pool: web::Data<PgPool>,
    identity: Identity,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());
    let user = service.get_user(&actor, *user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// GET /api/v1/users/search?query=
pub async fn search_users(
    pool: web::Data<PgPool>,
    identity: Identity,
    query: web::Query<SearchQuery>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());
    let page = service.search(&actor, &query.query, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/users/search/name?name=
pub async fn search_users_by_name(
    pool: web::Data<PgPool>,
    identity: Identity,
    query: web::Query<NameQuery>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());
    let page = service
        .search_by_field(&actor, SearchField::Name, &query.name, &params)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/users/search/surname?surname=
pub async fn search_users_by_surname(
    pool: web::Data<PgPool>,
    identity: Identity,
    query: web::Query<SurnameQuery>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());
    let page = service
        .search_by_field(&actor, SearchField::Surname, &query.surname, &params)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/users/search/username?username=
pub async fn search_users_by_username(
    pool: web::Data<PgPool>,
    identity: Identity,
    query: web::Query<UsernameQuery>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = UserService::new((**pool).clone());
    let page = service
        .search_by_field(&actor, SearchField::Username, &query.username, &params)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// POST /api/v1/users/{id}/follow
pub async fn follow_user(
    pool: web::Data<PgPool>,
    identity: Identity,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FollowService::new((**pool).clone());
    let user = service.follow(&actor, *user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// POST /api/v1/users/{id}/unfollow
pub async fn unfollow_user(
    pool: web::Data<PgPool>,
    identity: Identity,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FollowService::new((**pool).clone());
    let user = service.unfollow(&actor, *user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// GET /api/v1/users/me/following
pub async fn get_my_following(
    pool: web::Data<PgPool>,
    identity: Identity,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FollowService::new((**pool).clone());
    let page = service.following(&actor, actor.id, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/users/me/followers
pub async fn get_my_followers(
    pool: web::Data<PgPool>,
    identity: Identity,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FollowService::new((**pool).clone());
    let page = service.followers(&actor, actor.id, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/users/{id}/following
pub async fn get_user_following(
    pool: web::Data<PgPool>,
    identity: Identity,
    user_id: web::Path<Uuid>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FollowService::new((**pool).clone());
    let page = service.following(&actor, *user_id, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/users/{id}/followers
pub async fn get_user_followers(
    pool: web::Data<PgPool>,
    identity: Identity,
    user_id: web::Path<Uuid>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FollowService::new((**pool).clone());
    let page = service.followers(&actor, *user_id, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}
