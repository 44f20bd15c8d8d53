/// Route configuration
///
/// Literal segments (`/feed`, `/explore`, `/search`, `/me`) are registered
/// before their sibling `/{id}` resources so they are matched first.
use actix_web::web;

use crate::handlers::{auth, feed, health, posts, users};
use crate::middleware::JwtAuth;
use crate::security::jwt::JwtKeys;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig, keys: &JwtKeys) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/ready", web::get().to(health::readiness_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login)),
                )
                .service(
                    web::scope("/posts")
                        .wrap(JwtAuth::new(keys.clone()))
                        .service(web::resource("").route(web::post().to(posts::create_post)))
                        .route("/feed", web::get().to(feed::get_feed_posts))
                        .route("/explore", web::get().to(feed::get_explore_posts))
                        .service(
                            web::resource("/user/{user_id}")
                                .route(web::get().to(feed::get_user_posts)),
                        )
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(posts::get_post))
                                .route(web::put().to(posts::update_post))
                                .route(web::delete().to(posts::delete_post)),
                        )
                        .route("/{post_id}/like", web::post().to(posts::like_post))
                        .route("/{post_id}/dislike", web::post().to(posts::dislike_post)),
                )
                .service(
                    web::scope("/users")
                        .wrap(JwtAuth::new(keys.clone()))
                        .service(
                            web::resource("/me")
                                .route(web::get().to(users::get_me))
                                .route(web::put().to(users::update_me))
                                .route(web::delete().to(users::delete_me)),
                        )
                        .route("/me/following", web::get().to(users::get_my_following))
                        .route("/me/followers", web::get().to(users::get_my_followers))
                        .route("/search", web::get().to(users::search_users))
                        .route("/search/name", web::get().to(users::search_users_by_name))
                        .route(
                            "/search/surname",
                            web::get().to(users::search_users_by_surname),
                        )
                        .route(
                            "/search/username",
                            web::get().to(users::search_users_by_username),
                        )
                        .service(
                            web::resource("/{user_id}").route(web::get().to(users::get_user)),
                        )
                        .route("/{user_id}/follow", web::post().to(users::follow_user))
                        .route("/{user_id}/unfollow", web::post().to(users::unfollow_user))
                        .route(
                            "/{user_id}/following",
                            web::get().to(users::get_user_following),
                        )
                        .route(
                            "/{user_id}/followers",
                            web::get().to(users::get_user_followers),
                        ),
                ),
        );
}
