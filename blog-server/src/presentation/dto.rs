use crate::domain::error::DomainError;
use crate::domain::post::{Author, NewPost, Post, PostChanges};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ======================= POSTS =======================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
    /// Only present so a client-supplied value can be rejected.
    pub created: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
    pub created: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            author: post.author.full_name(),
            id: post.id,
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = DomainError;

    fn try_from(req: CreatePostRequest) -> Result<Self, Self::Error> {
        reject_created(&req.created)?;
        let title = required_text("title", req.title)?;
        let content = required_text("content", req.content)?;
        let author = req
            .author
            .ok_or_else(|| missing("author"))
            .and_then(AuthorPayload::into_author)?;

        Ok(NewPost {
            author,
            title,
            content,
        })
    }
}

impl UpdatePostRequest {
    /// Validates the body against the id taken from the request path.
    pub fn into_changes(self, path_id: Uuid) -> Result<PostChanges, DomainError> {
        if let Some(body_id) = self.id {
            if body_id != path_id {
                return Err(DomainError::Validation(format!(
                    "request path id ({}) and request body id ({}) must match",
                    path_id, body_id
                )));
            }
        }
        reject_created(&self.created)?;

        Ok(PostChanges {
            title: self.title.map(|t| non_blank("title", t)).transpose()?,
            content: self.content.map(|c| non_blank("content", c)).transpose()?,
            author: self.author.map(AuthorPayload::into_author).transpose()?,
        })
    }
}

impl AuthorPayload {
    fn into_author(self) -> Result<Author, DomainError> {
        let author = Author {
            first_name: self.first_name.unwrap_or_default().trim().to_string(),
            last_name: self.last_name.unwrap_or_default().trim().to_string(),
        };
        if author.full_name().is_empty() {
            return Err(DomainError::Validation(
                "`author` needs a non-empty `firstName` or `lastName`".into(),
            ));
        }
        Ok(author)
    }
}

// ======================= Utils =======================

fn missing(field: &str) -> DomainError {
    DomainError::Validation(format!("missing `{}` in request body", field))
}

fn required_text(field: &str, value: Option<String>) -> Result<String, DomainError> {
    value
        .ok_or_else(|| missing(field))
        .and_then(|v| non_blank(field, v))
}

fn non_blank(field: &str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::Validation(format!("`{}` must not be empty", field)))
    } else {
        Ok(value)
    }
}

fn reject_created(created: &Option<serde_json::Value>) -> Result<(), DomainError> {
    match created {
        Some(_) => Err(DomainError::Validation(
            "`created` is assigned by the server".into(),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(body: serde_json::Value) -> CreatePostRequest {
        serde_json::from_value(body).unwrap()
    }

    fn update_request(body: serde_json::Value) -> UpdatePostRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn valid_create_request_becomes_new_post() {
        let new_post = NewPost::try_from(create_request(json!({
            "title": "Hello",
            "content": "World",
            "author": { "firstName": " Ada ", "lastName": "Lovelace" }
        })))
        .unwrap();

        assert_eq!(new_post.title, "Hello");
        assert_eq!(new_post.author, Author::new("Ada", "Lovelace"));
    }

    #[test]
    fn create_request_requires_every_field() {
        let cases = [
            json!({ "content": "c", "author": { "firstName": "a" } }),
            json!({ "title": "t", "author": { "firstName": "a" } }),
            json!({ "title": "t", "content": "c" }),
            json!({ "title": " ", "content": "c", "author": { "firstName": "a" } }),
            json!({ "title": "t", "content": "c", "author": { "firstName": "", "lastName": " " } }),
        ];

        for body in cases {
            let result = NewPost::try_from(create_request(body.clone()));
            assert!(
                matches!(result, Err(DomainError::Validation(_))),
                "expected validation error for {body}"
            );
        }
    }

    #[test]
    fn create_request_rejects_client_timestamp() {
        let result = NewPost::try_from(create_request(json!({
            "title": "t",
            "content": "c",
            "author": { "firstName": "a", "lastName": "b" },
            "created": "2020-01-01T00:00:00Z"
        })));
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("created")));
    }

    #[test]
    fn update_request_keeps_absent_fields_absent() {
        let id = Uuid::new_v4();
        let changes = update_request(json!({ "id": id, "content": "new body" }))
            .into_changes(id)
            .unwrap();

        assert_eq!(
            changes,
            PostChanges {
                content: Some("new body".into()),
                ..PostChanges::default()
            }
        );
    }

    #[test]
    fn update_request_id_must_match_path() {
        let result = update_request(json!({ "id": Uuid::new_v4(), "title": "t" }))
            .into_changes(Uuid::new_v4());
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("must match")));
    }

    #[test]
    fn update_request_rejects_blank_title() {
        let result = update_request(json!({ "title": "" })).into_changes(Uuid::new_v4());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn response_renders_author_as_display_name() {
        let post = Post::new(NewPost {
            author: Author::new("Alan", "Turing"),
            title: "t".into(),
            content: "c".into(),
        });
        let json = serde_json::to_value(PostResponse::from(post.clone())).unwrap();

        assert_eq!(json["author"], "Alan Turing");
        assert_eq!(json["id"], json!(post.id));
        for key in ["id", "title", "content", "author", "created"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
