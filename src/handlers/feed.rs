/// Feed handlers - paginated post listings
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::current_user;
use crate::middleware::Identity;
use crate::models::PageParams;
use crate::services::FeedService;

/// GET /api/v1/posts/user/{userId}
pub async fn get_user_posts(
    pool: web::Data<PgPool>,
    identity: Identity,
    user_id: web::Path<Uuid>,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FeedService::new((**pool).clone());
    let page = service.user_posts(&actor, *user_id, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/posts/feed
pub async fn get_feed_posts(
    pool: web::Data<PgPool>,
    identity: Identity,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FeedService::new((**pool).clone());
    let page = service.feed_posts(&actor, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/posts/explore
pub async fn get_explore_posts(
    pool: web::Data<PgPool>,
    identity: Identity,
    params: web::Query<PageParams>,
) -> Result<HttpResponse> {
    let actor = current_user(pool.get_ref(), &identity).await?;
    let service = FeedService::new((**pool).clone());
    let page = service.explore_posts(&actor, &params).await?;

    Ok(HttpResponse::Ok().json(page))
}
