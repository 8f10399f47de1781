//! # Overlay Shared
//! 
//! Application configuration, telemetry and shared error types for the
//! frontend editing overlay.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
