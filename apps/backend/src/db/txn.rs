use std::future::Future;
use std::sync::Arc;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use super::txn_policy::{self, TxnPolicy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Run `f` inside a fresh transaction on the shared pool.
///
/// The closure receives a shared handle so it can move it into an `async move`
/// block. On `Ok` the transaction is committed (or rolled back under
/// `TxnPolicy::RollbackOnOk`); on `Err` it is rolled back and the original
/// error returned. Dropping the returned future drops the transaction, which
/// rolls back.
pub async fn with_txn<R, F, Fut>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: FnOnce(Arc<DatabaseTransaction>) -> Fut,
    Fut: Future<Output = Result<R, AppError>>,
{
    let txn = Arc::new(state.db.begin().await?);
    let out = f(Arc::clone(&txn)).await;

    // The closure's clones are gone once its future resolved
    let txn = Arc::try_unwrap(txn).map_err(|_| {
        AppError::internal("transaction handle outlived its unit of work")
    })?;

    match out {
        Ok(val) => match txn_policy::current() {
            TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            TxnPolicy::RollbackOnOk => {
                debug!("rolling back successful transaction per policy");
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failed unit of work also failed");
            }
            Err(err)
        }
    }
}
