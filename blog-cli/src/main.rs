use blog_client::{Author, BlogClientHttp, NewPost, PostUpdate};
use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(about = "Command line client for the blog post API")]
struct Cli {
    #[clap(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every post
    List,
    /// Show a single post
    Get { id: Uuid },
    Create {
        #[clap(long)]
        first_name: String,
        #[clap(long)]
        last_name: String,
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
    },
    /// Overwrite the given fields of a post
    Update {
        id: Uuid,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        content: Option<String>,
        #[clap(long, requires = "last_name")]
        first_name: Option<String>,
        #[clap(long, requires = "first_name")]
        last_name: Option<String>,
    },
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let client = BlogClientHttp::connect(&args.server)?;

    match args.command {
        Command::List => {
            let posts = client.list_posts().await?;
            println!("Posts ({})", posts.len());
            for post in posts {
                println!("- [{}] {} (by {})", post.id, post.title, post.author);
            }
        }
        Command::Get { id } => {
            let post = client.get_post(id).await?;
            println!("{}", post);
        }
        Command::Create {
            first_name,
            last_name,
            title,
            content,
        } => {
            let post = client
                .create_post(&NewPost {
                    author: Author {
                        first_name,
                        last_name,
                    },
                    title,
                    content,
                })
                .await?;
            println!("Post created! ID: {}", post.id);
        }
        Command::Update {
            id,
            title,
            content,
            first_name,
            last_name,
        } => {
            let author = match (first_name, last_name) {
                (Some(first_name), Some(last_name)) => Some(Author {
                    first_name,
                    last_name,
                }),
                _ => None,
            };
            let update = PostUpdate {
                title,
                content,
                author,
            };
            client.update_post(id, &update).await?;
            println!("Post updated: {}", id);
        }
        Command::Delete { id } => {
            client.delete_post(id).await?;
            println!("Post deleted!");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_with_full_author() {
        let id = Uuid::new_v4();
        let id_arg = id.to_string();
        let cli = Cli::try_parse_from([
            "blog-cli",
            "update",
            id_arg.as_str(),
            "--title",
            "New",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
        ])
        .unwrap();

        match cli.command {
            Command::Update {
                id: parsed,
                title,
                first_name,
                ..
            } => {
                assert_eq!(parsed, id);
                assert_eq!(title.as_deref(), Some("New"));
                assert_eq!(first_name.as_deref(), Some("Ada"));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.server, "http://127.0.0.1:8080");
    }

    #[test]
    fn update_rejects_half_an_author() {
        let id = Uuid::new_v4().to_string();
        let result =
            Cli::try_parse_from(["blog-cli", "update", id.as_str(), "--first-name", "Ada"]);
        assert!(result.is_err());
    }
}
