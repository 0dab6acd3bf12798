/// Route definitions
use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/institutions")
            .route("/signup", web::post().to(handlers::signup))
            .route("/login", web::post().to(handlers::login))
            .route("/profile", web::get().to(handlers::get_profile))
            .route("/profile", web::patch().to(handlers::update_profile))
            .route(
                "/passkey/regenerate",
                web::post().to(handlers::regenerate_passkey),
            ),
    );
}
