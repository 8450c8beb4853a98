use crate::config::{Config, PostSourceKind};
use crate::models::db_operations::posts_db_operations;
use crate::models::file_operations::posts_file_operations::{self, PostFileError};
use crate::models::{Post, PostSummary};
use crate::{DbPool, PostSource};
use actix_web::error::BlockingError;
use actix_web::web;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublicHelperError {
    #[error("Post not found")]
    NotFound,
    #[error("Failed to read posts: {0}")]
    PostFile(#[from] PostFileError),
    #[error("{0}")]
    Database(#[from] rusqlite::Error),
    #[error("{0}")]
    Pool(#[from] r2d2::Error),
    #[error("Blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
    #[error("DATABASE_PATH is required for the database source")]
    MissingDatabasePath,
}

type HelperResult<T> = Result<T, PublicHelperError>;

impl PostSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        PostSource::File(path.into())
    }

    /// Opens a pool of at most `max_size` connections to the SQLite file at `path`.
    pub fn database(path: impl Into<PathBuf>, max_size: u32) -> Result<Self, r2d2::Error> {
        let manager = SqliteConnectionManager::file(path.into());
        let pool: DbPool = Pool::builder().max_size(max_size).build(manager)?;
        Ok(PostSource::Database(pool))
    }

    pub fn from_config(config: &Config) -> HelperResult<Self> {
        match (config.post_source, config.database_path.as_deref()) {
            (PostSourceKind::File, _) => Ok(Self::file(config.posts_file())),
            (PostSourceKind::Database, Some(db_path)) => Ok(Self::database(db_path, config.db_pool_size)?),
            (PostSourceKind::Database, None) => Err(PublicHelperError::MissingDatabasePath),
        }
    }

    pub fn kind(&self) -> PostSourceKind {
        match self {
            PostSource::File(_) => PostSourceKind::File,
            PostSource::Database(_) => PostSourceKind::Database,
        }
    }

    /// Published posts, projected to the listing fields, newest first.
    pub fn list_published(&self) -> HelperResult<Vec<PostSummary>> {
        match self {
            PostSource::File(path) => Ok(posts_file_operations::read_published_post_summaries(path)?),
            PostSource::Database(pool) => {
                // The pooled connection goes back to the pool when it drops, on every path.
                let conn = pool.get()?;
                Ok(posts_db_operations::read_published_post_summaries(&conn)?)
            }
        }
    }

    pub fn get_by_slug(&self, slug: &str) -> HelperResult<Post> {
        let post = match self {
            PostSource::File(path) => posts_file_operations::read_published_post_by_slug(path, slug)?,
            PostSource::Database(pool) => {
                let conn = pool.get()?;
                posts_db_operations::read_published_post_by_slug(&conn, slug)?
            }
        };
        post.ok_or(PublicHelperError::NotFound)
    }
}

pub async fn fetch_published_posts(source: web::Data<PostSource>) -> HelperResult<Vec<PostSummary>> {
    web::block(move || source.list_published()).await?
}

pub async fn fetch_post_by_slug(source: web::Data<PostSource>, slug: String) -> HelperResult<Post> {
    web::block(move || source.get_by_slug(&slug)).await?
}
