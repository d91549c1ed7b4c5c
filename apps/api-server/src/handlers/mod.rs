//! HTTP handlers and route configuration.

mod analytics;
mod auth;
mod comments;
mod health;
mod posts;
mod votes;


use actix_web::{HttpRequest, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::NotFound(err.to_string()).into()
    }))
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/analytics/votes", web::get().to(analytics::daily_votes))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/comments", web::post().to(comments::create))
                    .route("/{id}/vote", web::post().to(votes::cast))
                    .route("/{id}/vote", web::delete().to(votes::retract))
                    .route("/{id}/vote", web::get().to(votes::status)),
            )
            .service(
                web::scope("/comments")
                    .route("/{id}", web::get().to(comments::subtree))
                    .route("/{id}", web::delete().to(comments::delete)),
            ),
    );
}
