use crate::models::{is_flag_set, Post, PostSummary};
use rusqlite::{params, Connection, OptionalExtension, Result as RusqliteResult, Row};
use serde_json::Value;

const SUMMARY_COLUMNS: &str = "id, slug, title, subtitle, author, summary, read_time, tags, category, created_on, updated_on, published, featured";

fn text(column: Option<String>) -> Value {
    column.map_or(Value::Null, Value::String)
}

fn summary_from_row(row: &Row) -> RusqliteResult<PostSummary> {
    Ok(PostSummary {
        id: Some(Value::from(row.get::<_, i64>(0)?)),
        slug: Some(Value::String(row.get(1)?)),
        title: Some(text(row.get(2)?)),
        subtitle: Some(text(row.get(3)?)),
        author: Some(text(row.get(4)?)),
        summary: Some(text(row.get(5)?)),
        read_time: Some(text(row.get(6)?)),
        tags: Some(text(row.get(7)?)),
        category: Some(text(row.get(8)?)),
        created_on: Some(text(row.get(9)?)),
        updated_on: Some(text(row.get(10)?)),
        published: Some(Value::Bool(row.get(11)?)),
        featured: Some(Value::Bool(row.get(12)?)),
    })
}

pub fn read_published_post_summaries(conn: &Connection) -> RusqliteResult<Vec<PostSummary>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM posts WHERE published = 1 ORDER BY created_on DESC, rowid ASC"
    ))?;
    let summaries = stmt
        .query_map([], summary_from_row)?
        .collect::<RusqliteResult<Vec<_>>>()?;
    Ok(summaries)
}

/// The published post with `slug`, including its content.
pub fn read_published_post_by_slug(conn: &Connection, slug: &str) -> RusqliteResult<Option<Post>> {
    conn.query_row(
        &format!("SELECT {SUMMARY_COLUMNS}, content FROM posts WHERE slug = ?1 AND published = 1 ORDER BY rowid LIMIT 1"),
        [slug],
        |row| {
            let mut post = Post::from(summary_from_row(row)?);
            post.0.insert("content".to_string(), text(row.get(13)?));
            Ok(post)
        },
    )
    .optional()
}

/// A record field as column text. Strings are stored as-is, other scalars
/// in their JSON form; `null` and absent fields become SQL NULL.
fn column_text(post: &Post, field: &str) -> Option<String> {
    match post.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Tag arrays are stored comma-joined, the way the export writes them as text.
fn tags_text(post: &Post) -> Option<String> {
    match post.get("tags")? {
        Value::Array(tags) => Some(
            tags.iter()
                .map(|tag| tag.as_str().map_or_else(|| tag.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => column_text(post, "tags"),
    }
}

/// Inserts a post, replacing any row with the same id. Used by the import tool only.
pub fn upsert_post(conn: &Connection, id: i64, post: &Post) -> RusqliteResult<usize> {
    conn.execute(
        "INSERT OR REPLACE INTO posts (id, slug, title, subtitle, author, summary, content, read_time, tags, category, created_on, updated_on, published, featured)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            id,
            post.slug().unwrap_or_default(),
            column_text(post, "title"),
            column_text(post, "subtitle"),
            column_text(post, "author"),
            column_text(post, "summary"),
            column_text(post, "content"),
            column_text(post, "read_time"),
            tags_text(post),
            column_text(post, "category"),
            column_text(post, "created_on"),
            column_text(post, "updated_on"),
            post.is_published(),
            post.get("featured").map_or(false, is_flag_set),
        ],
    )
}

pub fn count_posts(conn: &Connection) -> RusqliteResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
}
