use serde_json::{json, Value};

/// A small export in the shape the content process writes: string ids and "1"/"0" flags.
pub fn sample_posts() -> Value {
    json!([
        {
            "id": "1",
            "slug": "a",
            "title": "First",
            "subtitle": "The oldest post",
            "author": "sam",
            "summary": "Intro",
            "read_time": "3 min",
            "tags": "rust,actix",
            "category": "backend",
            "created_on": "2024-01-01 09:00:00",
            "updated_on": "2024-01-02 09:00:00",
            "published": "1",
            "featured": "0",
            "content": "# First"
        },
        {
            "id": "2",
            "slug": "b",
            "title": "Draft",
            "created_on": "2024-02-01 09:00:00",
            "published": "0",
            "featured": "0",
            "content": "# Draft"
        },
        {
            "id": "3",
            "slug": "c",
            "title": "Newest",
            "tags": ["sqlite"],
            "created_on": "2024-03-01 09:00:00",
            "updated_on": "2024-03-01 09:00:00",
            "published": "1",
            "featured": "1",
            "content": "# Newest"
        }
    ])
}

pub fn slugs(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("listing is an array")
        .iter()
        .map(|post| post["slug"].as_str().unwrap_or_default().to_string())
        .collect()
}
