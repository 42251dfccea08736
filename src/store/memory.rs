use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument};

use super::{TrackerStore, TrackerTx};
use crate::growth::models::GrowthData;
use crate::messages::models::Message;
use crate::players::models::Player;
use crate::records::models::MapRecord;
use crate::shared::AppError;
use crate::summary::models::Summary;

/// Rows of every table plus their id sequences
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    pub records: Vec<MapRecord>,
    pub players: Vec<Player>,
    pub summaries: Vec<Summary>,
    pub growth: Vec<GrowthData>,
    pub messages: Vec<Message>,
    next_id: i64,
}

impl MemoryTables {
    /// Hands out ids from a single sequence shared by all tables
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of the tracker store for development and testing
///
/// A transaction holds the table lock for its whole lifetime and mutates a
/// private copy, which replaces the shared tables only on commit. Data is lost
/// when the application restarts.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<MemoryTables>>,
    failing_record_writes: Arc<AtomicBool>,
    failing_growth_writes: Arc<AtomicBool>,
    reconciliation_locks: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent map record insert/update fail with a database
    /// error, for exercising rollback paths
    pub fn set_failing_record_writes(&self, failing: bool) {
        self.failing_record_writes.store(failing, Ordering::SeqCst);
    }

    /// Makes every subsequent growth point append fail with a database error
    pub fn set_failing_growth_writes(&self, failing: bool) {
        self.failing_growth_writes.store(failing, Ordering::SeqCst);
    }

    /// How many transactions have asked for the reconciliation lock so far
    pub fn reconciliation_lock_count(&self) -> usize {
        self.reconciliation_locks.load(Ordering::SeqCst)
    }

    /// Copy of the committed tables (useful for assertions)
    pub async fn snapshot(&self) -> MemoryTables {
        self.tables.lock().await.clone()
    }
}

#[async_trait]
impl TrackerStore for InMemoryStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> Result<Box<dyn TrackerTx>, AppError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();
        debug!("Opened in-memory transaction");

        Ok(Box::new(MemoryTx {
            guard,
            working,
            failing_record_writes: self.failing_record_writes.load(Ordering::SeqCst),
            failing_growth_writes: self.failing_growth_writes.load(Ordering::SeqCst),
            reconciliation_locks: Arc::clone(&self.reconciliation_locks),
        }))
    }
}

/// Transaction over [`InMemoryStore`]
pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryTables>,
    pub(crate) working: MemoryTables,
    failing_record_writes: bool,
    failing_growth_writes: bool,
    reconciliation_locks: Arc<AtomicUsize>,
}

impl MemoryTx {
    pub(crate) fn check_record_write(&self) -> Result<(), AppError> {
        if self.failing_record_writes {
            return Err(AppError::DatabaseError(
                "map record write rejected".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn check_growth_write(&self) -> Result<(), AppError> {
        if self.failing_growth_writes {
            return Err(AppError::DatabaseError(
                "growth point write rejected".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TrackerTx for MemoryTx {
    async fn lock_reconciliation(&mut self) -> Result<(), AppError> {
        // The table lock is already held for the lifetime of the transaction.
        self.reconciliation_locks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryTx {
            mut guard, working, ..
        } = *self;
        *guard = working;
        debug!("Committed in-memory transaction");
        Ok(())
    }
}
