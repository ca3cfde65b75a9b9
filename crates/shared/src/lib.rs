//! Shared errors, configuration, and telemetry for Fairshare.
//!
//! This crate provides the ambient pieces used by every caller of the
//! allocation engine:
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{AllocationConfig, AppConfig, DEFAULT_CYCLE_LIMIT_FACTOR, LoggingConfig};
pub use error::{AppError, AppResult};
pub use telemetry::init_tracing;
