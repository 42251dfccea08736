// Library crate for the DDNet cooperative progress tracker
// This file exposes the public API for the binaries and integration tests

pub mod config;
pub mod growth;
pub mod messages;
pub mod players;
pub mod records;
pub mod routes;
pub mod shared;
pub mod store;
pub mod summary;

// Re-export commonly used types for easier access in tests
pub use config::Config;
pub use records::{MapRecord, MapStatus, RecordService, SubmissionOutcome};
pub use routes::build_router;
pub use shared::{AppError, AppState, TrackerSettings};
pub use store::{InMemoryStore, PostgresStore, TrackerStore, TrackerTx};
