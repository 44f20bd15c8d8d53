/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::handlers::current_user;
use crate::middleware::Identity;
use crate::services::{PostPatch, PostService};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// POST /api/v1/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    identity: Identity,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(&actor, &req.title, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = PostService::new((**pool).clone());
    let post = service.get_post(&actor, *post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/v1/posts/{id}
pub async fn update_post(
    pool: web::Data<PgPool>,
    identity: Identity,
    post_id: web::Path<Uuid>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = PostService::new((**pool).clone());

    let req = req.into_inner();
    let patch = PostPatch {
        title: req.title,
        content: req.content,
    };
    let post = service.update_post(&actor, *post_id, patch).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = PostService::new((**pool).clone());
    service.delete_post(&actor, *post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/v1/posts/{id}/like
pub async fn like_post(
    pool: web::Data<PgPool>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    react(pool, identity, *post_id, true).await
}

/// POST /api/v1/posts/{id}/dislike
pub async fn dislike_post(
    pool: web::Data<PgPool>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    react(pool, identity, *post_id, false).await
}

async fn react(
    pool: web::Data<PgPool>,
    identity: Identity,
    post_id: Uuid,
    is_like: bool,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = PostService::new((**pool).clone());
    let post = service.react_to_post(&actor, post_id, is_like).await?;

    Ok(HttpResponse::Ok().json(post))
}
