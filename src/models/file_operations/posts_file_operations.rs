use crate::models::{Post, PostSummary};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostFileError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads and parses the whole posts file. Nothing is cached between calls.
///
/// The file must be a JSON array; entries that are not objects can never
/// match a slug or be published, so they are skipped.
pub fn read_all_posts(path: &Path) -> Result<Vec<Post>, PostFileError> {
    let data = fs::read_to_string(path)?;
    let records: Vec<Value> = serde_json::from_str(&data)?;
    Ok(records
        .into_iter()
        .filter_map(|record| match record {
            Value::Object(fields) => Some(Post(fields)),
            _ => None,
        })
        .collect())
}

/// Published posts, projected and ordered newest first.
///
/// The sort is stable, so posts sharing a `created_on` keep their file order.
/// Missing or unreadable timestamps sort after every dated post.
pub fn published_summaries(posts: Vec<Post>) -> Vec<PostSummary> {
    let mut summaries: Vec<PostSummary> = posts
        .into_iter()
        .filter(Post::is_published)
        .map(PostSummary::from)
        .collect();

    summaries.sort_by(|a, b| b.created_instant().cmp(&a.created_instant()));
    summaries
}

/// First published post with the given slug, as the full record.
pub fn find_published_by_slug(posts: Vec<Post>, slug: &str) -> Option<Post> {
    posts
        .into_iter()
        .find(|post| post.slug() == Some(slug) && post.is_published())
}

pub fn read_published_post_summaries(path: &Path) -> Result<Vec<PostSummary>, PostFileError> {
    Ok(published_summaries(read_all_posts(path)?))
}

pub fn read_published_post_by_slug(path: &Path, slug: &str) -> Result<Option<Post>, PostFileError> {
    Ok(find_published_by_slug(read_all_posts(path)?, slug))
}
