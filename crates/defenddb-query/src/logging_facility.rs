//! Structured logging facility for the command builder
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_clause!`, `log_reject!`, `log_build!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use defenddb_query::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_clause!(op, ...)` - A clause was appended (trace)
//! - `log_reject!(op, err)` - A token was refused (warn)
//! - `log_build!(op, segments = ..., ...)` - A command was finished (debug)

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
