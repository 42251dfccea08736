// Public API - what other modules can use
pub use handlers::{get_leaderboard, get_player_options};
pub use ledger::attribute_score;
pub use names::parse_runner_names;

mod handlers;
pub mod ledger;
pub mod models;
pub mod names;
pub mod repository;
pub mod service;
