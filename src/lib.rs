use std::path::PathBuf;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
pub type DbPool = Pool<SqliteConnectionManager>;

/// The data source behind the public API, built once by the entry point and
/// shared with every request through `web::Data`.
pub enum PostSource {
    /// A JSON array of posts, re-read on every request.
    File(PathBuf),
    /// The `posts` table of a SQLite database.
    Database(DbPool),
}

pub mod config;
pub mod helper;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod setup;
