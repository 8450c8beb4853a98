use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A post record exactly as the content process wrote it.
///
/// Only `slug`, `published` and `created_on` are interpreted; every other
/// field, whatever its JSON type, is carried through untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Post(pub Map<String, Value>);

impl Post {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn slug(&self) -> Option<&str> {
        self.get("slug").and_then(Value::as_str)
    }

    pub fn is_published(&self) -> bool {
        self.get("published").map_or(false, is_flag_set)
    }

    pub fn content(&self) -> Option<&str> {
        self.get("content").and_then(Value::as_str)
    }
}

/// The file convention for flags: only the string `"1"` is set.
pub fn is_flag_set(value: &Value) -> bool {
    value.as_str() == Some("1")
}

/// The listing projection of a [`Post`].
///
/// `None` means the field was absent and is left out of the JSON; a field
/// holding `null` stays `Some(Value::Null)` and is emitted as `null`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PostSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<Value>,
}

impl PostSummary {
    /// `created_on` as a comparable instant, if it holds one.
    pub fn created_instant(&self) -> Option<NaiveDateTime> {
        self.created_on.as_ref().and_then(timestamp_from_value)
    }

    pub fn slug_str(&self) -> Option<&str> {
        self.slug.as_ref().and_then(Value::as_str)
    }
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        let mut record = post.0;
        let mut take = |field: &str| record.remove(field);
        PostSummary {
            id: take("id"),
            slug: take("slug"),
            title: take("title"),
            subtitle: take("subtitle"),
            author: take("author"),
            summary: take("summary"),
            read_time: take("read_time"),
            tags: take("tags"),
            category: take("category"),
            created_on: take("created_on"),
            updated_on: take("updated_on"),
            published: take("published"),
            featured: take("featured"),
        }
    }
}

impl From<PostSummary> for Post {
    fn from(summary: PostSummary) -> Self {
        let fields = [
            ("id", summary.id),
            ("slug", summary.slug),
            ("title", summary.title),
            ("subtitle", summary.subtitle),
            ("author", summary.author),
            ("summary", summary.summary),
            ("read_time", summary.read_time),
            ("tags", summary.tags),
            ("category", summary.category),
            ("created_on", summary.created_on),
            ("updated_on", summary.updated_on),
            ("published", summary.published),
            ("featured", summary.featured),
        ];
        Post(
            fields
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
                .collect(),
        )
    }
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Parses a `created_on`/`updated_on` string into a comparable instant.
/// Offsets are normalised to UTC; naive timestamps are taken as-is.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Strings are parsed as timestamps, integers are epoch milliseconds.
pub fn timestamp_from_value(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

pub mod db_operations;
pub mod file_operations;
