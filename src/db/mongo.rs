/// MongoDB-backed store
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::{Client, Collection, Database};
use std::collections::HashMap;

use super::Store;
use crate::error::Result;
use crate::models::{Comment, CommentInput, Post, PostInput};

const POSTS: &str = "posts";
const COMMENTS: &str = "comments";

/// Store client over one MongoDB database.
///
/// Constructed once at startup and injected into the handlers; there is no
/// process-global connection.
pub struct MongoStore {
    db: Database,
    posts: Collection<Post>,
    comments: Collection<Comment>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        Ok(Self {
            posts: db.collection(POSTS),
            comments: db.collection(COMMENTS),
            db,
        })
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut cursor = self.posts.find(doc! {}).sort(doc! { "created_at": 1 }).await?;
        let mut posts = Vec::new();
        while let Some(post) = cursor.try_next().await? {
            posts.push(post);
        }
        Ok(posts)
    }

    async fn insert_post(&self, input: &PostInput) -> Result<Post> {
        let post = Post {
            id: ObjectId::new(),
            title: input.title.clone(),
            body: input.body.clone(),
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        self.posts.insert_one(&post).await?;
        Ok(post)
    }

    async fn find_post(&self, id: &ObjectId) -> Result<Option<Post>> {
        Ok(self.posts.find_one(doc! { "_id": id }).await?)
    }

    async fn update_post(&self, id: &ObjectId, input: &PostInput) -> Result<bool> {
        let result = self
            .posts
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "title": &input.title, "body": &input.body } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_post(&self, id: &ObjectId) -> Result<bool> {
        let result = self.posts.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_comment(&self, input: &CommentInput) -> Result<Comment> {
        let comment = Comment {
            id: ObjectId::new(),
            body: input.body.clone(),
            created_at: Utc::now(),
        };
        self.comments.insert_one(&comment).await?;
        Ok(comment)
    }

    async fn find_comment(&self, id: &ObjectId) -> Result<Option<Comment>> {
        Ok(self.comments.find_one(doc! { "_id": id }).await?)
    }

    async fn delete_comment(&self, id: &ObjectId) -> Result<bool> {
        let result = self.comments.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn attach_comment(&self, post_id: &ObjectId, comment_id: &ObjectId) -> Result<bool> {
        let result = self
            .posts
            .update_one(
                doc! { "_id": post_id },
                doc! { "$push": { "comments": comment_id } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn detach_comment(&self, post_id: &ObjectId, comment_id: &ObjectId) -> Result<bool> {
        let result = self
            .posts
            .update_one(
                doc! { "_id": post_id },
                doc! { "$pull": { "comments": comment_id } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn find_comments(&self, ids: &[ObjectId]) -> Result<Vec<Comment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // $in gives no ordering guarantee; re-order by the post's list and
        // drop ids that no longer resolve.
        let mut cursor = self
            .comments
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let mut by_id: HashMap<ObjectId, Comment> = HashMap::new();
        while let Some(comment) = cursor.try_next().await? {
            by_id.insert(comment.id, comment);
        }

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
