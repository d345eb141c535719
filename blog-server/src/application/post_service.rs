use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::{
    error::DomainError,
    post::{NewPost, Post, PostChanges},
};
use crate::seed;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self, new_post), fields(title = %new_post.title))]
    pub async fn create_post(&self, new_post: NewPost) -> Result<Post, DomainError> {
        self.repo.create(Post::new(new_post)).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        self.repo
            .update_post(id, changes)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    /// Deleting an unknown id is not an error; the result says whether a post was removed.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let removed = self.repo.delete_post(id).await?;
        if !removed {
            info!(post_id = %id, "delete of unknown post ignored");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    pub async fn seed(&self, count: usize) -> Result<u64, DomainError> {
        seed::seed_posts(self.repo.as_ref(), count).await?;
        let total = self.repo.count().await?;
        info!(seeded = count, total, "seed data inserted");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory_repository::InMemoryPostRepository;
    use crate::domain::post::Author;

    fn service() -> PostService {
        PostService::new(Arc::new(InMemoryPostRepository::new()))
    }

    fn new_post() -> NewPost {
        NewPost {
            author: Author::new("Edsger", "Dijkstra"),
            title: "Goto considered harmful".into(),
            content: "A letter to the editor".into(),
        }
    }

    #[tokio::test]
    async fn created_post_is_readable() {
        let service = service();
        let created = service.create_post(new_post()).await.unwrap();

        let fetched = service.get_post(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_post_is_not_found() {
        let id = Uuid::new_v4();
        let err = service().get_post(id).await.unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn update_unknown_post_is_not_found() {
        let err = service()
            .update_post(Uuid::new_v4(), PostChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let service = service();
        let created = service.create_post(new_post()).await.unwrap();

        assert!(service.delete_post(created.id).await.unwrap());
        assert!(!service.delete_post(created.id).await.unwrap());
        assert!(service.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn seed_reports_collection_size() {
        let service = service();
        service.create_post(new_post()).await.unwrap();

        assert_eq!(service.seed(4).await.unwrap(), 5);
        assert_eq!(service.list_posts().await.unwrap().len(), 5);
    }
}
