//! Request-scoped cancellation.
//!
//! Every service call made by the HTTP adapter runs under a deadline. When it
//! trips, the in-flight future is dropped; any transaction it owned is dropped
//! with it and rolls back.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Race `fut` against `token`; the token winning yields `Cancelled`.
pub async fn cancellable<T, E, F>(token: &CancellationToken, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DomainError>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("request cancelled before completion");
            Err(DomainError::cancelled("request cancelled").into())
        }
        out = fut => out,
    }
}

/// Run `fut` with a deadline; exceeding it yields `Cancelled`.
pub async fn with_deadline<T, E, F>(deadline: Duration, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DomainError>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(out) => out,
        Err(_) => {
            debug!(deadline_ms = deadline.as_millis() as u64, "request deadline exceeded");
            Err(DomainError::cancelled("request deadline exceeded").into())
        }
    }
}

/// Deadline + token, the shape route handlers use.
pub async fn guarded<T, F>(
    token: &CancellationToken,
    deadline: Duration,
    fut: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    cancellable(token, with_deadline(deadline, fut)).await
}
