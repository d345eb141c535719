use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Postgres connection string; posts are kept in memory when absent.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default)]
    pub seed_posts: usize,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let seed_posts = lookup("SEED_POSTS")
            .unwrap_or_else(|| "0".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid SEED_POSTS: {}", e))?;
        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid REQUEST_TIMEOUT_SECS: {}", e))?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            seed_posts,
            request_timeout_secs,
        })
    }

    /// Loopback config on an ephemeral port with in-memory storage.
    pub fn local() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: None,
            cors_origins: vec!["*".into()],
            seed_posts: 0,
            request_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database_url.is_none());
        assert_eq!(config.cors_origins, ["*"]);
        assert_eq!(config.seed_posts, 0);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn reads_all_variables() {
        let config = load(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("SEED_POSTS", "10"),
            ("REQUEST_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/blog"));
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
        assert_eq!(config.seed_posts, 10);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("SEED_POSTS", "-1")]).is_err());
        assert!(load(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
    }
}
