//! Shared types, errors, and configuration for Ledgerly.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Session token claims and the JWT service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

#[cfg(test)]
mod jwt_tests;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
