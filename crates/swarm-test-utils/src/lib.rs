//! # Swarm Test Utilities
//!
//! Shared test utilities for swarm connection telemetry.
//!
//! ## Modules
//!
//! - `fixtures` - `ConnectionState` values for common transport stacks
//! - `recorded` - Snapshot of metrics captured by a `DebuggingRecorder`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swarm_test_utils::*;
//!
//! let recorded = capture(|| {
//!     metrics.record_connection_opened(Direction::Outbound, &tcp_tls_yamux());
//! });
//!
//! // Labels must match the recorded series exactly
//! assert_eq!(
//!     recorded.counter(
//!         "swarm/connections_opened",
//!         &[("direction", "outbound"), ("transport", "tcp"), ("security", "tls"), ("muxer", "yamux")],
//!     ),
//!     Some(1),
//! );
//! ```

pub mod fixtures;
pub mod recorded;

// Re-export commonly used items
pub use fixtures::*;
pub use recorded::*;
