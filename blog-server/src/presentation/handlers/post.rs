use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::domain::post::NewPost;
use crate::presentation::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::presentation::middleware::RequestId;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web};
use tracing::info;
use uuid::Uuid;

/// Registers the `/posts` resource and routes extractor failures into the error envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| DomainError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| DomainError::Validation(err.to_string()).into()),
    )
    .service(get_posts)
    .service(get_post)
    .service(create_post)
    .service(update_post)
    .service(delete_post);
}

#[get("/posts")]
async fn get_posts(
    req: HttpRequest,
    service: web::Data<PostService>,
) -> Result<HttpResponse, DomainError> {
    let posts: Vec<PostResponse> = service
        .list_posts()
        .await?
        .into_iter()
        .map(PostResponse::from)
        .collect();

    info!(
        request_id = %request_id(&req),
        total = posts.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(posts))
}

#[get("/posts/{id}")]
async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

#[post("/posts")]
async fn create_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let new_post = NewPost::try_from(payload.into_inner())?;
    let post = service.create_post(new_post).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

#[put("/posts/{id}")]
async fn update_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<UpdatePostRequest>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let changes = payload.into_inner().into_changes(post_id)?;

    service.update_post(post_id, changes).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        "post updated"
    );

    Ok(HttpResponse::NoContent().finish())
}

#[delete("/posts/{id}")]
async fn delete_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let removed = service.delete_post(post_id).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        removed,
        "post deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
