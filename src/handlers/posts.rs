/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use askama::Template;
use std::collections::HashMap;

use super::{html, parse_id, redirect};
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::validate;
use crate::views::{EditPostTemplate, NewPostTemplate, PostIndexTemplate, ShowPostTemplate};

/// GET /posts
pub async fn list_posts(store: web::Data<dyn Store>) -> Result<HttpResponse> {
    let posts = store.list_posts().await?;
    Ok(html(PostIndexTemplate { posts: &posts }.render()?))
}

/// GET /posts/new
pub async fn new_post_form() -> Result<HttpResponse> {
    Ok(html(NewPostTemplate.render()?))
}

/// POST /posts
pub async fn create_post(
    store: web::Data<dyn Store>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let input = validate::post_input(&form)?;
    let post = store.insert_post(&input).await?;
    tracing::info!(post_id = %post.id, "post created");
    Ok(redirect(format!("/posts/{}", post.id)))
}

/// GET /posts/{id}
pub async fn show_post(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    let post = store
        .find_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no post with id {id}")))?;
    let comments = store.find_comments(&post.comments).await?;
    Ok(html(
        ShowPostTemplate {
            post: &post,
            comments: &comments,
        }
        .render()?,
    ))
}

/// GET /posts/{id}/edit
pub async fn edit_post_form(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    let post = store
        .find_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no post with id {id}")))?;
    Ok(html(EditPostTemplate { post: &post }.render()?))
}

/// PUT /posts/{id}
pub async fn update_post(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    let input = validate::post_input(&form)?;
    if !store.update_post(&id, &input).await? {
        return Err(AppError::NotFound(format!("no post with id {id}")));
    }
    Ok(redirect(format!("/posts/{id}")))
}

/// DELETE /posts/{id}/delete
///
/// The post's comment records are not cascade-deleted; see the store
/// contract.
pub async fn delete_post(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    if !store.delete_post(&id).await? {
        return Err(AppError::NotFound(format!("no post with id {id}")));
    }
    tracing::info!(post_id = %id, "post deleted");
    Ok(redirect("/posts".to_string()))
}
