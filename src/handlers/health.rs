/// Health check handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "social-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /ready - verifies the database connection is usable
pub async fn readiness_check(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "ready": true,
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "error": format!("PostgreSQL connection failed: {}", e),
        })),
    }
}
