//! In-memory post storage, used when no database is configured and by tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostChanges};

/// Posts kept in insertion order behind an async `RwLock`.
///
/// Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(DomainError::Internal(format!("duplicate post id {}", post.id)));
        }
        posts.push(post.clone());

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn insert_many(&self, batch: Vec<Post>) -> Result<usize, DomainError> {
        let mut posts = self.posts.write().await;
        for (i, post) in batch.iter().enumerate() {
            let clashes = posts.iter().chain(&batch[..i]).any(|p| p.id == post.id);
            if clashes {
                return Err(DomainError::Internal(format!("duplicate post id {}", post.id)));
            }
        }

        let inserted = batch.len();
        posts.extend(batch);

        info!(inserted, "post batch inserted");
        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.read().await.clone())
    }

    async fn update_post(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, DomainError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.apply(changes);
        info!(post_id = %id, "post updated");
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        let removed = posts.len() != before;
        if removed {
            info!(post_id = %id, "post deleted");
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.posts.read().await.len() as u64)
    }
}
