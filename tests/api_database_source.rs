mod common;

use actix_web::{http::StatusCode, test, web, App};
use posts_api::models::ErrorBody;
use posts_api::setup::db_setup::{import_posts_file, setup_posts_db};
use posts_api::{routes, PostSource};
use rusqlite::Connection;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Creates a SQLite posts database in `dir` loaded with the sample export.
fn seeded_database(dir: &Path) -> PathBuf {
    let json_path = dir.join("allposts.json");
    fs::write(&json_path, common::sample_posts().to_string()).unwrap();

    let db_path = dir.join("posts.db");
    let mut conn = Connection::open(&db_path).unwrap();
    setup_posts_db(&mut conn).unwrap();
    import_posts_file(&mut conn, &json_path).unwrap();
    db_path
}

macro_rules! db_app {
    ($db_path:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(PostSource::database($db_path, 5).unwrap()))
                .configure(routes::public::config_api),
        )
        .await
    };
}

#[actix_web::test]
async fn listing_matches_the_file_source_shape() {
    let dir = tempfile::tempdir().unwrap();
    let app = db_app!(seeded_database(dir.path()));

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(common::slugs(&body), vec!["c", "a"]);

    let newest = &body[0];
    assert_eq!(newest["id"], json!(3));
    assert_eq!(newest["published"], json!(true));
    assert_eq!(newest["featured"], json!(true));
    assert_eq!(newest["tags"], json!("sqlite"));
    assert!(newest.get("content").is_none());
}

#[actix_web::test]
async fn single_post_includes_content() {
    let dir = tempfile::tempdir().unwrap();
    let app = db_app!(seeded_database(dir.path()));

    let req = test::TestRequest::get().uri("/api/posts/a").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], json!(1));
    assert_eq!(body["title"], json!("First"));
    assert_eq!(body["content"], json!("# First"));
    assert_eq!(body["featured"], json!(false));
}

#[actix_web::test]
async fn unpublished_and_unknown_slugs_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = db_app!(seeded_database(dir.path()));

    for uri in ["/api/posts/b", "/api/posts/missing"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Post not found");
    }
}

#[actix_web::test]
async fn more_requests_than_connections_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = seeded_database(dir.path());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(PostSource::database(&db_path, 1).unwrap()))
            .configure(routes::public::config_api),
    )
    .await;

    // With a single pooled connection, each request only succeeds if the previous one released it.
    for uri in ["/api/posts", "/api/posts/missing", "/api/posts/c", "/api/posts"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_ne!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
    }
}

#[actix_web::test]
async fn missing_table_is_an_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = db_app!(dir.path().join("blank.db"));

    let req = test::TestRequest::get().uri("/api/posts/a").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.error.contains("no such table"), "{}", body.error);
}

#[actix_web::test]
async fn empty_table_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("posts.db");
    setup_posts_db(&mut Connection::open(&db_path).unwrap()).unwrap();
    let app = db_app!(db_path);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}
