use crate::error::BlogClientError;
use crate::{NewPost, Post, PostUpdate};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct BlogClientHttp {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Health {
    pub status: String,
}

impl BlogClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, BlogClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post_url(&self, id: Uuid) -> String {
        format!("{}/posts/{}", self.base_url, id)
    }

    async fn check(resp: Response) -> Result<Response, BlogClientError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(BlogClientError::from_http_response(resp).await)
        }
    }

    pub async fn health(&self) -> Result<Health, BlogClientError> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, BlogClientError> {
        let resp = self
            .client
            .get(format!("{}/posts", self.base_url))
            .send()
            .await?;
        let posts: Vec<Post> = Self::check(resp).await?.json().await?;
        debug!(count = posts.len(), "listed posts");
        Ok(posts)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, BlogClientError> {
        let resp = self.client.get(self.post_url(id)).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Post, BlogClientError> {
        let resp = self
            .client
            .post(format!("{}/posts", self.base_url))
            .json(post)
            .send()
            .await?;
        let created: Post = Self::check(resp).await?.json().await?;
        debug!(post_id = %created.id, "created post");
        Ok(created)
    }

    pub async fn update_post(&self, id: Uuid, update: &PostUpdate) -> Result<(), BlogClientError> {
        let mut body = serde_json::to_value(update)
            .map_err(|e| BlogClientError::InvalidRequest(e.to_string()))?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("id".into(), json!(id));
        }

        let resp = self.client.put(self.post_url(id)).json(&body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<(), BlogClientError> {
        let resp = self.client.delete(self.post_url(id)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
