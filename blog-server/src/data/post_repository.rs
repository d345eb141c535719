use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post, PostChanges};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    async fn insert_many(&self, posts: Vec<Post>) -> Result<usize, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;
    /// Returns `None` when no post has the given id.
    async fn update_post(&self, id: Uuid, changes: PostChanges)
    -> Result<Option<Post>, DomainError>;
    /// Returns whether a post was actually removed.
    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    title: String,
    content: String,
    created: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author: Author {
                first_name: row.first_name,
                last_name: row.last_name,
            },
            title: row.title,
            content: row.content,
            created: row.created,
        }
    }
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INSERT_POST: &str = r#"
    INSERT INTO posts (id, first_name, last_name, title, content, created)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        sqlx::query(INSERT_POST)
            .bind(post.id)
            .bind(&post.author.first_name)
            .bind(&post.author.last_name)
            .bind(&post.title)
            .bind(&post.content)
            .bind(post.created)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to create post: {}", e);
                DomainError::from(e)
            })?;

        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<Post>) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await?;
        let inserted = posts.len();

        for post in posts {
            sqlx::query(INSERT_POST)
                .bind(post.id)
                .bind(post.author.first_name)
                .bind(post.author.last_name)
                .bind(post.title)
                .bind(post.content)
                .bind(post.created)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("failed to insert post batch: {}", e);
                    DomainError::from(e)
                })?;
        }

        tx.commit().await?;
        info!(inserted, "post batch inserted");
        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, first_name, last_name, title, content, created
            FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::from(e)
        })?;

        Ok(row.map(Post::from))
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, first_name, last_name, title, content, created
            FROM posts
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::from(e)
        })?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update_post(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>, DomainError> {
        let (first_name, last_name) = match changes.author {
            Some(author) => (Some(author.first_name), Some(author.last_name)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET
                title = COALESCE($1, title),
                content = COALESCE($2, content),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name)
            WHERE id = $5
            RETURNING id, first_name, last_name, title, content, created
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(first_name)
        .bind(last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::from(e)
        })?;

        if row.is_some() {
            info!(post_id = %id, "post updated");
        }

        Ok(row.map(Post::from))
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::from(e)
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(post_id = %id, "post deleted");
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
