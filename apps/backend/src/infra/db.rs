use std::future::Future;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::DbSettings;
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

/// Describe the engine without leaking credentials from the URL.
fn engine_label(settings: &DbSettings) -> &'static str {
    if settings.is_memory() {
        "sqlite::memory:"
    } else if settings.is_sqlite() {
        "sqlite"
    } else {
        "postgresql"
    }
}

/// Retry a connection attempt with fixed interval delays
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(settings: &DbSettings) -> ConnectOptions {
    let mut opts = ConnectOptions::new(settings.url.clone());
    opts.max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .sqlx_logging(false);

    // Reaping the only connection of a memory database would drop the database
    if !settings.is_memory() {
        opts.idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime);
    }
    opts
}

/// Build the bounded pool and ping it once. Does NOT run migrations.
pub async fn connect_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let started = Instant::now();
    let engine = engine_label(settings);
    let attempts = if settings.is_memory() {
        1
    } else {
        CONNECT_ATTEMPTS
    };

    let conn = retry_connection(
        || async {
            let conn = Database::connect(connect_options(settings)).await?;
            conn.ping().await?;
            Ok(conn)
        },
        attempts,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;

    if settings.is_sqlite() {
        conn.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    }

    info!(
        engine,
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "database pool ready"
    );
    Ok(conn)
}

/// Connect, then bring the schema up to date.
pub async fn bootstrap_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(settings).await?;
    migrate(&conn, MigrationCommand::Up).await.map_err(|e| {
        AppError::config(format!("schema migration failed: {e}"))
    })?;
    Ok(conn)
}
