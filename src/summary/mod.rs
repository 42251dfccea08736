pub use handlers::get_summary;
pub use service::SummaryService;

pub mod aggregator;
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
