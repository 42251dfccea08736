use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument, warn};

use super::{TrackerStore, TrackerTx};
use crate::shared::AppError;

/// Key for the transaction-scoped advisory lock taken by record submissions
const RECONCILIATION_LOCK_KEY: i64 = 0x6464_6e65_74;

/// PostgreSQL implementation of the tracker store
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackerStore for PostgresStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> Result<Box<dyn TrackerTx>, AppError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction"))?;
        debug!("Opened database transaction");
        Ok(Box::new(PgTx { tx }))
    }
}

/// Transaction over [`PostgresStore`]; rolled back by sqlx when dropped
pub struct PgTx {
    pub(crate) tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl TrackerTx for PgTx {
    #[instrument(skip(self))]
    async fn lock_reconciliation(&mut self) -> Result<(), AppError> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(RECONCILIATION_LOCK_KEY)
            .execute(&mut *self.tx)
            .await
            .map_err(db_error("take reconciliation lock"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx
            .commit()
            .await
            .map_err(db_error("commit transaction"))?;
        debug!("Committed database transaction");
        Ok(())
    }
}

/// Logs a sqlx failure and converts it into [`AppError::DatabaseError`]
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        warn!(error = %e, operation, "Database operation failed");
        AppError::DatabaseError(e.to_string())
    }
}
