use std::sync::Arc;

use blog_client::{Author, BlogClientError, BlogClientHttp, NewPost, PostUpdate};
use blog_server::application::post_service::PostService;
use blog_server::data::memory_repository::InMemoryPostRepository;
use blog_server::infrastructure::config::AppConfig;
use blog_server::server::{self, RunningServer};
use uuid::Uuid;

async fn start_server(seed: usize) -> (RunningServer, BlogClientHttp) {
    let service = PostService::new(Arc::new(InMemoryPostRepository::new()));
    service.seed(seed).await.unwrap();

    let server = server::start(&AppConfig::local(), service).unwrap();
    let client = BlogClientHttp::connect(&server.url()).unwrap();
    (server, client)
}

fn new_post() -> NewPost {
    NewPost {
        author: Author {
            first_name: "Leslie".into(),
            last_name: "Lamport".into(),
        },
        title: "Time, clocks, and the ordering of events".into(),
        content: "A distributed system consists of a collection of processes.".into(),
    }
}

#[actix_web::test]
async fn full_post_lifecycle() {
    let (server, client) = start_server(5).await;

    assert_eq!(client.health().await.unwrap().status, "ok");
    assert_eq!(client.list_posts().await.unwrap().len(), 5);

    let created = client.create_post(&new_post()).await.unwrap();
    assert_eq!(created.author, "Leslie Lamport");
    assert_eq!(client.get_post(created.id).await.unwrap(), created);

    let update = PostUpdate {
        title: Some("Paxos made simple".into()),
        ..PostUpdate::default()
    };
    client.update_post(created.id, &update).await.unwrap();
    let updated = client.get_post(created.id).await.unwrap();
    assert_eq!(updated.title, "Paxos made simple");
    assert_eq!(updated.content, created.content);

    client.delete_post(created.id).await.unwrap();
    client.delete_post(created.id).await.unwrap();
    assert!(matches!(
        client.get_post(created.id).await,
        Err(BlogClientError::NotFound(_))
    ));
    assert_eq!(client.list_posts().await.unwrap().len(), 5);

    server.stop().await.unwrap();
}

#[actix_web::test]
async fn server_errors_map_to_client_errors() {
    let (server, client) = start_server(0).await;

    let mut invalid = new_post();
    invalid.title = "  ".into();
    match client.create_post(&invalid).await {
        Err(BlogClientError::InvalidRequest(message)) => assert!(message.contains("title")),
        other => panic!("expected invalid request, got {other:?}"),
    }

    let update = PostUpdate {
        content: Some("orphan".into()),
        ..PostUpdate::default()
    };
    assert!(matches!(
        client.update_post(Uuid::new_v4(), &update).await,
        Err(BlogClientError::NotFound(_))
    ));

    server.stop().await.unwrap();
}

#[test]
fn connect_trims_trailing_slash() {
    let client = BlogClientHttp::connect("http://localhost:8080/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}
