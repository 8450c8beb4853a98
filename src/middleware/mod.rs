use actix_cors::Cors;
use actix_web::middleware::{NormalizePath, TrailingSlash};

/// CORS for the read-only API. `"*"` admits any origin; otherwise a comma separated list.
/// Request headers are not restricted.
pub fn cors_policy(allowed_origins: &str) -> Cors {
    let cors = if allowed_origins.trim() == "*" {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}

/// `/api/posts/` and `/api/posts` route the same.
pub fn trim_trailing_slash() -> NormalizePath {
    NormalizePath::new(TrailingSlash::Trim)
}
