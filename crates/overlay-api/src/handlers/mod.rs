//! HTTP handlers

pub mod health;
pub mod edit_information;
pub mod toggle;
pub mod feedback;
