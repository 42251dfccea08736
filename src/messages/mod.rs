pub use handlers::{get_messages, post_message};
pub use service::MessageService;

mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
