//! Services coordinating repositories with shared infrastructure.

pub mod session;

pub use session::{IssuedToken, SessionIssuer};
