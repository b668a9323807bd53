//! Subcommand implementations

use anyhow::{Context, Result};
use quill_server::db::{self, seed, PgPool};

use crate::config::{DatabaseArgs, ServeArgs};

async fn connect(args: &DatabaseArgs) -> Result<PgPool> {
    db::connect(&args.database_url, args.max_connections)
        .await
        .context("Failed to connect to database (check DATABASE_URL)")
}

/// `quill serve`
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool = connect(&args.database).await?;

    if args.no_migrate {
        tracing::warn!("Skipping migrations on startup");
    } else {
        db::migrate(&pool)
            .await
            .context("Failed to apply migrations")?;
    }

    quill_server::run_server(pool, args.server_config())
        .await
        .context("HTTP server failed")
}

/// `quill migrate`
pub async fn run_migrate(args: DatabaseArgs) -> Result<()> {
    let pool = connect(&args).await?;
    db::migrate(&pool)
        .await
        .context("Failed to apply migrations")?;

    pool.close().await;
    Ok(())
}

/// `quill seed`
pub async fn run_seed(args: DatabaseArgs) -> Result<()> {
    let pool = connect(&args).await?;
    db::migrate(&pool)
        .await
        .context("Failed to apply migrations")?;

    let report = seed::run(&pool).await.context("Failed to seed database")?;
    tracing::info!(
        categories = report.categories,
        posts = report.posts,
        "Seed complete"
    );

    pool.close().await;
    Ok(())
}
