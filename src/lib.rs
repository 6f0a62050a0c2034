pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod kafka;
pub mod repositories;
pub mod resilience;
pub mod services;
pub mod users;

pub use config::Config;
pub use db::create_pool;
pub use error::{AppError, Result};
