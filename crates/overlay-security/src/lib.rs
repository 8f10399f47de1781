//! # Overlay Security
//! 
//! Editor session tokens: issuing, validation and extraction from requests.

pub mod jwt;
pub mod session;

pub use jwt::{Claims, JwtError, JwtService};
pub use session::SessionToken;
