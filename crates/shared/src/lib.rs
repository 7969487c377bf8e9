//! Shared types, errors, and configuration for Lingua.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Small shared value types (person names, payment status)

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
