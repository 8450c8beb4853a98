use actix_web::{middleware::{DefaultHeaders, Logger}, web, App, HttpServer};
use clap::Parser;
use posts_api::middleware::{cors_policy, trim_trailing_slash};
use posts_api::{config::Config, routes, PostSource};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "posts_api_server", author, version, about = "Serves published blog posts as JSON.")]
struct Cli {
    /// Path to the .env configuration file.
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.env_file.as_deref())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    let source = PostSource::from_config(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("Failed to open the post source: {}", e)))?;
    log::info!("Serving posts from the {:?} source", source.kind());
    let source = web::Data::new(source);

    let server_address = config.server_address();
    log::info!("API server running on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_policy(&config.allowed_origins))
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(trim_trailing_slash())
            .app_data(source.clone())
            .configure(routes::public::config_api)
    })
    .bind(server_address)?
    .run()
    .await?;

    log::info!("API server stopped");
    Ok(())
}
