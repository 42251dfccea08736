// Public API - what other modules can use
pub use handlers::{create_record, get_map_options, get_maps};
pub use models::{MapRecord, MapStatus};
pub use service::{RecordService, SubmissionOutcome};

// Internal modules
pub mod catalog;
mod handlers;
pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
