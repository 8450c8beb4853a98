use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Where the posts are read from. Chosen once per deployment.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostSourceKind {
    File,
    Database,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub post_source: PostSourceKind,
    pub posts_file_path: String,
    #[serde(default)]
    pub database_path: Option<String>,
    pub db_pool_size: u32,
    pub allowed_origins: String,
    pub log_level: String,
}

impl Config {
    /// Loads the optional `.env` file, then resolves the configuration from the process environment.
    pub fn load(env_path: Option<&Path>) -> Result<Self, config::ConfigError> {
        if let Some(env_path) = env_path {
            dotenvy::from_path(env_path).map_err(|e| {
                config::ConfigError::Message(format!(
                    "FATAL: Failed to load .env file from '{}'. Error: {}",
                    env_path.display(),
                    e
                ))
            })?;
        } else {
            // A missing ./.env is fine; everything has a default.
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration from `lookup` (normally the process environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let post_source = match lookup("POST_SOURCE")
            .unwrap_or_else(|| "file".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "file" => "file",
            "database" => "database",
            other => {
                return Err(config::ConfigError::Message(format!(
                    "FATAL: 'POST_SOURCE' must be 'file' or 'database', got '{}'.",
                    other
                )))
            }
        };

        let posts_file_path =
            lookup("POSTS_FILE_PATH").unwrap_or_else(|| "allposts.json".to_string());

        let database_path = lookup("DATABASE_PATH").filter(|p| !p.trim().is_empty());
        if post_source == "database" && database_path.is_none() {
            return Err(config::ConfigError::Message(
                "FATAL: 'DATABASE_PATH' must be set when 'POST_SOURCE' is 'database'.".to_string(),
            ));
        }

        let db_pool_size = match lookup("DB_POOL_SIZE") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                config::ConfigError::Message(format!(
                    "FATAL: 'DB_POOL_SIZE' must be a positive integer, got '{}'.",
                    raw
                ))
            })?,
            None => 5,
        };
        if db_pool_size == 0 {
            return Err(config::ConfigError::Message(
                "FATAL: 'DB_POOL_SIZE' must be at least 1.".to_string(),
            ));
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let mut builder = config::Config::builder()
            .set_default("web.host", "127.0.0.1")?
            .set_default("web.port", 3001_i64)?
            // Optional base settings (e.g. web host/port) from the TOML file.
            .add_source(
                config::File::new("config/default.toml", config::FileFormat::Toml).required(false),
            )
            .set_override("post_source", post_source)?
            .set_override("posts_file_path", posts_file_path)?
            .set_override("db_pool_size", i64::from(db_pool_size))?
            .set_override("allowed_origins", allowed_origins)?
            .set_override("log_level", log_level)?;

        if let Some(database_path) = database_path {
            builder = builder.set_override("database_path", database_path)?;
        }
        if let Some(host) = lookup("WEB_HOST") {
            builder = builder.set_override("web.host", host)?;
        }
        if let Some(raw) = lookup("WEB_PORT") {
            let port = raw.trim().parse::<u16>().map_err(|_| {
                config::ConfigError::Message(format!(
                    "FATAL: 'WEB_PORT' must be a valid port number, got '{}'.",
                    raw
                ))
            })?;
            builder = builder.set_override("web.port", i64::from(port))?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }

    pub fn posts_file(&self) -> PathBuf {
        PathBuf::from(&self.posts_file_path)
    }
}
