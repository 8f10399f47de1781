//! # Overlay Core
//! 
//! Domain entities, collaborator traits and the menu generation pipeline of
//! the frontend editing overlay.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;
pub mod text;

// Re-export domain entities
pub use domain::*;
pub use error::{CoreError, RouteError};
