//! Junk removal city site
//!
//! Serves the city landing pages rendered from `content/cities/*.md` and,
//! for local development, stands in for the hosted form backend that
//! receives lead submissions. The same pages can be exported as static
//! HTML with `site-server build`.
//!
//! ## Routes
//!
//! - `GET /` home page listing every city
//! - `GET /cities/:slug` one city page
//! - `POST /`, `POST /cities/:slug` lead form sink, redirects with `?success=true`
//! - `GET /forms` hidden form registration page
//! - `GET /health`
//! - `/pkg/*` the wasm bundle for the lead form

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod error;
mod export;
mod pages;
mod routes;

use config::SiteConfig;
use routes::AppState;

/// Command-line arguments for the site server
#[derive(Parser, Debug)]
#[command(name = "site-server")]
#[command(about = "City landing pages with lead capture")]
struct Args {
    /// Directory holding one markdown file per city
    #[arg(long, env = "CONTENT_DIR", default_value = "content/cities", global = true)]
    content_dir: PathBuf,

    /// wasm-pack output served under /pkg
    #[arg(
        long,
        env = "ASSETS_DIR",
        default_value = "apps/leads-web/wasm/pkg",
        global = true
    )]
    assets_dir: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000", global = true)]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "SITE_HOST", default_value = "0.0.0.0", global = true)]
    host: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Serve the site over HTTP (default)
    Serve,

    /// Write every page as static HTML
    Build {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SiteConfig::new(args.content_dir, args.assets_dir);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config, &args.host, args.port).await,
        Command::Build { out } => {
            export::export_site(&config, &out)?;
            Ok(())
        }
    }
}

async fn run_server(config: SiteConfig, host: &str, port: u16) -> anyhow::Result<()> {
    info!(
        "Starting site server on {}:{} (content: {}, assets: {})",
        host,
        port,
        config.content_dir.display(),
        config.assets_dir.display()
    );

    let app = routes::router(AppState::new(config));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
