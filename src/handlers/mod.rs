/// HTTP request handlers
///
/// Every handler returns `Result<HttpResponse, AppError>`; a fault raised
/// at any point, before or after a store call, propagates through `?` to
/// the error pipeline in `crate::error`. None of them retry or swallow
/// failures.
pub mod comments;
pub mod posts;

pub use comments::{create_comment, delete_comment};
pub use posts::{
    create_post, delete_post, edit_post_form, list_posts, new_post_form, show_post, update_post,
};

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use bson::oid::ObjectId;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::views::HomeTemplate;
use askama::Template;

/// GET /
pub async fn home() -> Result<HttpResponse> {
    Ok(html(HomeTemplate.render()?))
}

/// GET /health
pub async fn health(store: web::Data<dyn Store>) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => {
            tracing::error!("store ping failed: {}", e);
            HttpResponse::ServiceUnavailable()
                .json(serde_json::json!({ "status": "unavailable" }))
        }
    }
}

/// Catch-all for unmatched routes: a 404 fault through the same pipeline
/// as everything else.
pub async fn not_found() -> Result<HttpResponse> {
    Err(AppError::NotFound("Not Found!".to_string()))
}

/// An id that is not even a well-formed ObjectId can never resolve, so it
/// reports not-found rather than a parse error.
pub(crate) fn parse_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::NotFound(format!("no record with id {raw}")))
}

pub(crate) fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body)
}
