//! CLI administration tool for warnlink.
//!
//! Works directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short URL
//! cargo run --bin admin -- create https://example.com --alias abc --warning-type nsfw
//!
//! # Show a short URL and its access count
//! cargo run --bin admin -- show abc
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Uses the same variables as the server (`DATABASE_URL`, `CODE_GENERATION_ATTEMPTS`, ...).

use warnlink::api::dto::short_url::CreateShortUrlRequest;
use warnlink::application::services::ShortUrlService;
use warnlink::config::{self, Config};
use warnlink::domain::entities::ShortUrl;
use warnlink::domain::repositories::ShortUrlRepository;
use warnlink::infrastructure::persistence::SqliteShortUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing warnlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short URL
    Create {
        /// Destination URL
        original_url: String,

        /// Custom short code
        #[arg(short, long)]
        alias: Option<String>,

        /// Warning type: nsfw, trigger or custom
        #[arg(short, long)]
        warning_type: Option<String>,

        /// Free-text warning
        #[arg(short, long)]
        custom_warning: Option<String>,
    },

    /// Show a short URL without counting an access
    Show {
        /// Short code
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let repository = Arc::new(
        SqliteShortUrlRepository::connect(&config.database_url, &config.sqlite_settings())
            .await
            .context("Failed to connect to database")?,
    );

    let result = match cli.command {
        Commands::Create {
            original_url,
            alias,
            warning_type,
            custom_warning,
        } => {
            let request = CreateShortUrlRequest {
                original_url: Some(original_url),
                alias,
                warning_type,
                custom_warning,
            };
            create(&config, repository.clone(), request).await
        }
        Commands::Show { code } => show(&config, repository.clone(), &code).await,
        Commands::Stats => handle_stats(repository.as_ref()).await,
        Commands::Db { action } => match action {
            DbAction::Check => check_db(repository.as_ref(), &config).await,
        },
    };

    repository.close().await;
    result
}

/// Creates a short URL through the same rules as `POST /api/new`.
async fn create(
    config: &Config,
    repository: Arc<SqliteShortUrlRepository>,
    request: CreateShortUrlRequest,
) -> Result<()> {
    let input = request.into_validated().map_err(|e| {
        anyhow::anyhow!("Invalid input: {} {}", e, e.to_error_info().details)
    })?;

    let service =
        ShortUrlService::with_generation_attempts(repository, config.code_generation_attempts);

    let created = service
        .create_short_url(input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("{}", "✅ Short URL created".green().bold());
    println!();
    print_short_url(&created, config);

    Ok(())
}

/// Prints one short URL.
async fn show(
    config: &Config,
    repository: Arc<SqliteShortUrlRepository>,
    code: &str,
) -> Result<()> {
    let service = ShortUrlService::new(repository);

    let short_url = service
        .get_short_url(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_short_url(&short_url, config);

    Ok(())
}

fn print_short_url(short_url: &ShortUrl, config: &Config) {
    let created = chrono::DateTime::from_timestamp(short_url.created_at, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| short_url.created_at.to_string());

    println!("  Code:        {}", short_url.short_code.cyan());
    if let Some(full) = config.link_settings().short_url(&short_url.short_code) {
        println!("  Short URL:   {}", full.bright_cyan());
    }
    println!("  Destination: {}", short_url.original_url);
    println!(
        "  Warning:     {}",
        short_url
            .warning_type
            .as_ref()
            .map(|w| w.as_str().yellow().to_string())
            .unwrap_or_else(|| "none".bright_black().to_string())
    );
    if let Some(ref custom) = short_url.custom_warning {
        println!("  Message:     {}", custom.yellow());
    }
    println!("  Created:     {}", created.bright_black());
    println!(
        "  Accesses:    {}",
        short_url.access_count.to_string().bright_white().bold()
    );
    println!();
}

/// Displays totals over the whole store.
async fn handle_stats(repository: &SqliteShortUrlRepository) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = repository
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Short URLs: {}",
        summary.total_urls.to_string().bright_white().bold()
    );
    println!(
        "  Accesses:   {}",
        summary.total_accesses.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Checks that the database answers queries.
async fn check_db(repository: &SqliteShortUrlRepository, config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking database connection...".bright_blue());

    match repository.ping().await {
        Ok(()) => {
            println!("{}", "✅ Database connection OK".green().bold());
            println!("  {}", config.database_url.bright_black());
            Ok(())
        }
        Err(e) => {
            println!("{}", "❌ Database connection failed".red().bold());
            Err(anyhow::anyhow!("{}", e))
        }
    }
}
