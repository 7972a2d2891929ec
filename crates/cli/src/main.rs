//! `rusty-rest-starter` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — apply pending migrations, then start the API server.
//! - `migrate` — run pending database migrations and exit.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rusty-rest-starter",
    about = "REST API starter template service",
    version
)]
struct Cli {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Connection pool ceiling.
    #[arg(long, env = "MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,

    /// Directory for daily-rotating log files; console only when unset.
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations, then start the REST API server.
    Serve {
        #[arg(long, env = "BIND", default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Run pending database migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref());

    let pool = db::create_pool(&cli.database_url, cli.max_connections)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::Serve { bind } => {
            // Migrations run before the listener binds, so no request is
            // accepted against a stale schema.
            db::run_migrations(&pool).await.context("migration failed")?;
            info!("Starting API server on {bind}");
            api::serve(&bind, pool).await.context("server error")?;
        }
        Command::Migrate => {
            db::run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
    }

    Ok(())
}

/// Console logging always; an extra daily-rotating file layer when
/// `log_dir` is set.  The returned guard must stay alive for the file
/// writer to flush.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "service.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}
