pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use db::{create_pool, PantryStore, PgStore};
pub use error::AppError;
pub use service::SuggestionService;
