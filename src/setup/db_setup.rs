use crate::models::db_operations::posts_db_operations;
use crate::models::file_operations::posts_file_operations::{self, PostFileError};
use crate::models::Post;
use rusqlite::Connection;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
    #[error("Posts file error: {0}")]
    PostFile(#[from] PostFileError),
    #[error("Post at position {index} has no integer id (got {id:?})")]
    InvalidId { index: usize, id: Option<Value> },
    #[error("Post with id {0} has no slug")]
    MissingSlug(i64),
}

/// Integer ids, integral floats such as `26.0`, and numeric strings map to a row id.
fn record_id(post: &Post) -> Option<i64> {
    match post.get("id")? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn setup_posts_db(conn: &mut Connection) -> Result<(), SetupError> {
    let tx = conn.transaction()?;
    println!("- Creating 'posts' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY,
            slug TEXT NOT NULL,
            title TEXT,
            subtitle TEXT,
            author TEXT,
            summary TEXT,
            content TEXT,
            read_time TEXT,
            tags TEXT,
            category TEXT,
            created_on TEXT,
            updated_on TEXT,
            published INTEGER NOT NULL DEFAULT 0,
            featured INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    println!("- Creating 'posts' indexes...");
    tx.execute("CREATE INDEX IF NOT EXISTS idx_posts_slug ON posts (slug)", [])?;
    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_posts_created_on ON posts (published, created_on)",
        [],
    )?;

    tx.commit()?;
    Ok(())
}

/// Loads every post of a JSON posts file into the `posts` table in one transaction.
/// Returns the number of rows written. Nothing is written if any record is rejected.
pub fn import_posts_file(conn: &mut Connection, json_path: &Path) -> Result<usize, SetupError> {
    let posts = posts_file_operations::read_all_posts(json_path)?;

    let tx = conn.transaction()?;
    for (index, post) in posts.iter().enumerate() {
        let id = record_id(post).ok_or_else(|| SetupError::InvalidId {
            index,
            id: post.get("id").cloned(),
        })?;
        if post.slug().map_or(true, str::is_empty) {
            return Err(SetupError::MissingSlug(id));
        }
        posts_db_operations::upsert_post(&tx, id, post)?;
    }
    tx.commit()?;

    Ok(posts.len())
}
