/// Store abstraction for the `posts` and `comments` collections
///
/// The application owns no state between requests; everything durable
/// lives behind this trait. The store assigns document ids and creation
/// timestamps on insert. Backends:
///
/// - [`MongoStore`]: MongoDB, the production backend
/// - [`MemoryStore`]: process-local maps, used by the test suite and by
///   `KNOT_STORE=memory` for running without a database
pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::error::Result;
use crate::models::{Comment, CommentInput, Post, PostInput};

/// One adapter over both collections.
///
/// `attach_comment`/`detach_comment` mutate the parent post's ordered
/// comment list; they are separate single-document writes, never a
/// multi-document transaction.
#[async_trait]
pub trait Store: Send + Sync {
    /// All posts, oldest first
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Persist a new post with a fresh id and timestamp
    async fn insert_post(&self, input: &PostInput) -> Result<Post>;

    async fn find_post(&self, id: &ObjectId) -> Result<Option<Post>>;

    /// Overwrite title and body; returns whether the id matched a post
    async fn update_post(&self, id: &ObjectId, input: &PostInput) -> Result<bool>;

    /// Remove a post record; its comments are left in place (no cascade)
    async fn delete_post(&self, id: &ObjectId) -> Result<bool>;

    /// Persist a new comment with a fresh id and timestamp
    async fn insert_comment(&self, input: &CommentInput) -> Result<Comment>;

    async fn find_comment(&self, id: &ObjectId) -> Result<Option<Comment>>;

    async fn delete_comment(&self, id: &ObjectId) -> Result<bool>;

    /// Append a comment id to a post's list; returns whether the post matched
    async fn attach_comment(&self, post_id: &ObjectId, comment_id: &ObjectId) -> Result<bool>;

    /// Remove a comment id from a post's list; returns whether the post matched
    async fn detach_comment(&self, post_id: &ObjectId, comment_id: &ObjectId) -> Result<bool>;

    /// Resolve comment ids in the order given, skipping ids that no longer
    /// resolve (dangling entries are cleaned up lazily, not surfaced)
    async fn find_comments(&self, ids: &[ObjectId]) -> Result<Vec<Comment>>;

    /// Liveness probe for the health endpoint
    async fn ping(&self) -> Result<()>;
}
