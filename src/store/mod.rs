//! Unit-of-work plumbing shared by every domain repository.
//!
//! A request opens one [`TrackerTx`] through [`TrackerStore::begin`], runs all
//! of its reads and writes against it and calls [`TrackerTx::commit`]. A
//! transaction dropped without commit is rolled back, so a failure anywhere in
//! the reconciliation chain leaves nothing behind.

mod memory;
mod postgres;

pub use memory::{InMemoryStore, MemoryTables, MemoryTx};
pub use postgres::{PgTx, PostgresStore};
pub(crate) use postgres::db_error;

use async_trait::async_trait;

use crate::growth::repository::GrowthRepository;
use crate::messages::repository::MessageRepository;
use crate::players::repository::PlayerRepository;
use crate::records::repository::RecordRepository;
use crate::shared::AppError;
use crate::summary::repository::SummaryRepository;

/// Entry point into persistence: hands out transactions
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn TrackerTx>, AppError>;
}

/// A single transaction spanning every table the tracker owns
#[async_trait]
pub trait TrackerTx:
    RecordRepository + PlayerRepository + SummaryRepository + GrowthRepository + MessageRepository
{
    /// Serializes concurrent reconciliations until this transaction ends
    async fn lock_reconciliation(&mut self) -> Result<(), AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
