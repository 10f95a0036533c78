//! Common utilities and types shared across swarm components.

#![warn(clippy::pedantic)]

/// Module for common error types
pub mod error;

/// Module for connection types reported by transports
pub mod types;

/// Module for common configuration
pub mod config;

/// Module for tracing subscriber setup
pub mod observability;
