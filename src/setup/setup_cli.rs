use clap::{Parser, Subcommand};
use posts_api::config::Config;
use posts_api::setup::db_setup;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "setup_cli", author, version, about = "Prepares the SQLite posts database.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the .env configuration file.
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand, Debug)]
enum DbAction {
    /// Creates the posts table if it does not exist.
    Setup,
    /// Copies a posts JSON file into the posts table.
    Import {
        /// Defaults to POSTS_FILE_PATH.
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.env_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    let Some(db_path) = config.database_path.as_deref().map(Path::new) else {
        eprintln!("❌ Error: DATABASE_PATH is not set in your environment or .env file.");
        std::process::exit(1);
    };

    let ok = match &cli.command {
        Commands::Db { action } => match action {
            DbAction::Setup => setup_posts_database(db_path),
            DbAction::Import { from } => {
                let json_path = from
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&config.posts_file_path));
                import_posts(db_path, &json_path)
            }
        },
    };

    if !ok {
        std::process::exit(1);
    }
}

fn setup_posts_database(db_path: &Path) -> bool {
    println!("\nSetting up posts database at '{}'...", db_path.display());

    if let Some(parent_dir) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent_dir) {
            eprintln!("❌ Error: Could not create database directory: {}", e);
            return false;
        }
    }

    let mut conn = match Connection::open(db_path) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("❌ Error: Could not open posts database: {}", e);
            return false;
        }
    };
    match db_setup::setup_posts_db(&mut conn) {
        Ok(_) => {
            println!("✅ Posts database setup completed successfully.");
            true
        }
        Err(e) => {
            eprintln!("❌ Error setting up posts database: {}", e);
            false
        }
    }
}

fn import_posts(db_path: &Path, json_path: &Path) -> bool {
    if !db_path.exists() {
        eprintln!(
            "❌ Error: Posts database not found at '{}'. Please run `setup_cli db setup` first.",
            db_path.display()
        );
        return false;
    }
    let mut conn = match Connection::open(db_path) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("❌ Error: Could not open posts database: {}", e);
            return false;
        }
    };

    println!("Importing posts from '{}'...", json_path.display());
    match db_setup::import_posts_file(&mut conn, json_path) {
        Ok(count) => {
            println!("✅ Imported {} posts.", count);
            true
        }
        Err(e) => {
            eprintln!("❌ Error importing posts: {}", e);
            false
        }
    }
}
