/// Auth handlers - registration and login
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::Result;
use crate::security::jwt::JwtKeys;
use crate::services::AuthService;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Surname is required"))]
    pub surname: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// POST /api/v1/auth/register
pub async fn register(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = AuthService::new((**pool).clone(), keys.get_ref().clone());
    let user = service
        .register(&req.username, &req.email, &req.password, &req.name, &req.surname)
        .await?;

    Ok(HttpResponse::Created().json(user))
}

/// POST /api/v1/auth/login
pub async fn login(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = AuthService::new((**pool).clone(), keys.get_ref().clone());
    let token = service.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token.access_token,
        token_type: "Bearer".to_string(),
        expires_in: token.expires_in,
    }))
}
