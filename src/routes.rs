/// Route table
///
/// Shared between the binary and the integration tests so both mount
/// exactly the same surface. Every resource falls back to the 404 fault:
/// a known path with an unregistered method is still an unmatched route
/// and goes through the same error pipeline as an unknown path.
use actix_web::{web, Route};

use crate::handlers;

fn unmatched() -> Route {
    web::route().to(handlers::not_found)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(handlers::home))
            .default_service(unmatched()),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(handlers::health))
            .default_service(unmatched()),
    )
    .service(
        web::scope("/posts")
            .service(
                web::resource("")
                    .route(web::get().to(handlers::list_posts))
                    .route(web::post().to(handlers::create_post))
                    .default_service(unmatched()),
            )
            // "new" must be registered ahead of "{id}"
            .service(
                web::resource("/new")
                    .route(web::get().to(handlers::new_post_form))
                    .default_service(unmatched()),
            )
            .service(
                web::resource("/{id}/edit")
                    .route(web::get().to(handlers::edit_post_form))
                    .default_service(unmatched()),
            )
            .service(
                web::resource("/{id}/delete")
                    .route(web::delete().to(handlers::delete_post))
                    .default_service(unmatched()),
            )
            .service(
                web::resource("/{id}/comments")
                    .route(web::post().to(handlers::create_comment))
                    .default_service(unmatched()),
            )
            .service(
                web::resource("/{id}/comments/{comment_id}")
                    .route(web::delete().to(handlers::delete_comment))
                    .default_service(unmatched()),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(handlers::show_post))
                    .route(web::put().to(handlers::update_post))
                    .default_service(unmatched()),
            ),
    )
    .default_service(unmatched());
}
