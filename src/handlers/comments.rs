/// Comment handlers - HTTP endpoints for comment operations
///
/// Attaching and detaching touch two documents with two independent
/// writes; the store offers no transaction across them. Both writes are
/// awaited before the redirect, and a comment orphaned by the race is
/// tolerated by the show-post join.
use actix_web::{web, HttpResponse};
use std::collections::HashMap;

use super::{parse_id, redirect};
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::validate;

/// POST /posts/{id}/comments
pub async fn create_comment(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path)?;
    let input = validate::comment_input(&form)?;

    let post = store
        .find_post(&post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no post with id {post_id}")))?;

    let comment = store.insert_comment(&input).await?;
    if !store.attach_comment(&post.id, &comment.id).await? {
        // Parent vanished between the two writes; the comment record is
        // left dangling and skipped by the lazy join.
        return Err(AppError::NotFound(format!("no post with id {post_id}")));
    }
    tracing::info!(post_id = %post.id, comment_id = %comment.id, "comment created");

    Ok(redirect(format!("/posts/{post_id}")))
}

/// DELETE /posts/{id}/comments/{comment_id}
pub async fn delete_comment(
    store: web::Data<dyn Store>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let post_id = parse_id(&raw_post_id)?;
    let comment_id = parse_id(&raw_comment_id)?;

    if !store.detach_comment(&post_id, &comment_id).await? {
        return Err(AppError::NotFound(format!("no post with id {post_id}")));
    }
    if !store.delete_comment(&comment_id).await? {
        return Err(AppError::NotFound(format!(
            "no comment with id {comment_id}"
        )));
    }
    tracing::info!(post_id = %post_id, comment_id = %comment_id, "comment deleted");

    Ok(redirect(format!("/posts/{post_id}")))
}
