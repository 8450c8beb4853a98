use crate::helper::public_helpers::{self, PublicHelperError};
use crate::models::ErrorBody;
use crate::PostSource;
use actix_web::{web, HttpResponse, Responder};

pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/is_server_active", web::get().to(is_server_active))
            .route("/posts", web::get().to(get_published_posts))
            .route("/posts/{slug}", web::get().to(get_post_by_slug)),
    );
}

fn error_response(err: &PublicHelperError) -> HttpResponse {
    let body = ErrorBody { error: err.to_string() };
    match err {
        PublicHelperError::NotFound => HttpResponse::NotFound().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

async fn is_server_active() -> impl Responder {
    HttpResponse::Ok().body("active")
}

async fn get_published_posts(source: web::Data<PostSource>) -> impl Responder {
    match public_helpers::fetch_published_posts(source).await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(e) => {
            log::error!("Failed to fetch published posts: {}", e);
            error_response(&e)
        }
    }
}

async fn get_post_by_slug(slug: web::Path<String>, source: web::Data<PostSource>) -> impl Responder {
    let slug = slug.into_inner();
    match public_helpers::fetch_post_by_slug(source, slug.clone()).await {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(PublicHelperError::NotFound) => error_response(&PublicHelperError::NotFound),
        Err(e) => {
            log::error!("Failed to fetch post '{}': {}", slug, e);
            error_response(&e)
        }
    }
}
