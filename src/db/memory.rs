/// In-memory store
///
/// Mirrors the MongoDB backend's semantics over plain maps. The test suite
/// runs the whole HTTP pipeline against this backend; `KNOT_STORE=memory`
/// selects it for running the app without a database. Nothing survives a
/// restart.
use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::Store;
use crate::error::Result;
use crate::models::{Comment, CommentInput, Post, PostInput};

#[derive(Default)]
pub struct MemoryStore {
    posts: RwLock<HashMap<ObjectId, Post>>,
    comments: RwLock<HashMap<ObjectId, Comment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        // Map order is arbitrary; match Mongo's created_at sort, with the
        // id as tie-breaker for same-instant inserts.
        posts.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
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
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: &ObjectId) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn update_post(&self, id: &ObjectId, input: &PostInput) -> Result<bool> {
        match self.posts.write().await.get_mut(id) {
            Some(post) => {
                post.title = input.title.clone();
                post.body = input.body.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_post(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.posts.write().await.remove(id).is_some())
    }

    async fn insert_comment(&self, input: &CommentInput) -> Result<Comment> {
        let comment = Comment {
            id: ObjectId::new(),
            body: input.body.clone(),
            created_at: Utc::now(),
        };
        self.comments.write().await.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: &ObjectId) -> Result<Option<Comment>> {
        Ok(self.comments.read().await.get(id).cloned())
    }

    async fn delete_comment(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.comments.write().await.remove(id).is_some())
    }

    async fn attach_comment(&self, post_id: &ObjectId, comment_id: &ObjectId) -> Result<bool> {
        match self.posts.write().await.get_mut(post_id) {
            Some(post) => {
                post.comments.push(*comment_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn detach_comment(&self, post_id: &ObjectId, comment_id: &ObjectId) -> Result<bool> {
        match self.posts.write().await.get_mut(post_id) {
            Some(post) => {
                post.comments.retain(|id| id != comment_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_comments(&self, ids: &[ObjectId]) -> Result<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(ids.iter().filter_map(|id| comments.get(id).cloned()).collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
