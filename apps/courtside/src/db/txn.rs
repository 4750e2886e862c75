//! Explicit transaction helpers.
//!
//! ```ignore
//! let txn = db::begin(&conn).await?;
//! let out = do_work(&SeaStore::new(&txn)).await;
//! let value = db::settle(txn, out).await?;
//! ```

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::errors::domain::DomainError;

pub async fn begin<C>(conn: &C) -> Result<DatabaseTransaction, DomainError>
where
    C: TransactionTrait,
{
    Ok(conn.begin().await?)
}

/// Commit on `Ok`, roll back on `Err`. A failed rollback is logged and the
/// original error is returned.
pub async fn settle<T>(
    txn: DatabaseTransaction,
    out: Result<T, DomainError>,
) -> Result<T, DomainError> {
    match out {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
