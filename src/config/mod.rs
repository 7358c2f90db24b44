/// Hosted gateway credentials from environment variables
pub mod backend;

/// Default category catalog loading from config.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;
