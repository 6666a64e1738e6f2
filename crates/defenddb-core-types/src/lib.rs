//! Core types shared across DefendDB facilities
//!
//! This crate holds the canonical schema constants used by the query
//! builder's logging facility and by callers that filter or assert on
//! its structured events:
//!
//! - **Field keys**: component, op, event, error kind/code, clause counts
//! - **Event names**: clause appended, token rejected, command built

pub mod schema;
