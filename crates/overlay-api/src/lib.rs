//! # Overlay API
//! 
//! HTTP handlers, request extraction, error mapping and the router serving
//! the frontend editing overlay.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::router;
pub use state::AppState;
