pub mod config;
pub mod database;
pub mod error;
pub mod identifier;
pub mod stats;
pub mod types;
