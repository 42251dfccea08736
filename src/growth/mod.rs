pub use handlers::get_growth;
pub use models::{GrowthData, SnapshotEvent};

mod handlers;
pub mod models;
pub mod recorder;
pub mod repository;
pub mod service;
