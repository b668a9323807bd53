//! quill - blog backend command-line tool
//!
//! - `serve`: run the HTTP API
//! - `migrate`: apply schema migrations
//! - `seed`: insert demo categories and posts

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::{DatabaseArgs, ServeArgs};
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "quill",
    author,
    version,
    about = "Blog backend: categories, posts and moderated comments over Postgres"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (applies pending migrations first)
    Serve(ServeArgs),
    /// Apply pending schema migrations
    Migrate(DatabaseArgs),
    /// Insert demo categories and posts (safe to re-run)
    Seed(DatabaseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
    }
    Ok(())
}
