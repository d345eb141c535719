use std::sync::Arc;

use blog_server::application::post_service::PostService;
use blog_server::data::memory_repository::InMemoryPostRepository;
use blog_server::data::post_repository::{PostRepository, PostgresPostRepository};
use blog_server::infrastructure::config::AppConfig;
use blog_server::infrastructure::database::{create_pool, run_migrations};
use blog_server::infrastructure::logging::init_logging;
use blog_server::server;
use tracing::warn;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;

    let repo: Arc<dyn PostRepository> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            Arc::new(PostgresPostRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, posts are kept in memory");
            Arc::new(InMemoryPostRepository::new())
        }
    };

    let post_service = PostService::new(repo);
    if config.seed_posts > 0 {
        post_service.seed(config.seed_posts).await?;
    }

    server::start(&config, post_service)?.wait().await?;

    Ok(())
}
