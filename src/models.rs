/// Data models for KnowledgeKnot
///
/// `Post` and `Comment` are the documents held by the store. A post embeds
/// the ordered list of its comment ids; comments are looked up through
/// that list when a post page is rendered.
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A post with its ordered comment references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub body: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<ObjectId>,
}

/// A comment, referenced by exactly one post in normal operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub body: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Validated fields for creating or updating a post.
///
/// Produced only by [`crate::validate::post_input`]; the store never sees
/// an unvalidated bag of form fields.
#[derive(Debug, Clone, Validate)]
pub struct PostInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub body: String,
}

/// Validated fields for creating a comment
#[derive(Debug, Clone, Validate)]
pub struct CommentInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub body: String,
}
