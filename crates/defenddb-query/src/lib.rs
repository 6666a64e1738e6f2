//! DefendDB query - command builder for the manager/agent data store
//!
//! The store takes plain-text commands over its socket and has no
//! parameter binding, so every identifier and value is spliced into the
//! command text. This crate is the only gate in front of that splice:
//!
//! - Allow-list validators for agent ids and restricted tokens
//! - Validated token types that can only be built through those checks
//! - `QueryBuilder`, a flat fluent builder over raw text
//! - `grammar::Query`, a typestate builder that only permits well-formed
//!   commands
//! - Structured error facility with stable codes
//! - Structured logging facility built on `tracing`
//!
//! Sending the command and parsing the reply belong to the transport and
//! are not handled here.

pub mod buffer;
pub mod builder;
pub mod errors;
pub mod grammar;
pub mod logging_facility;
pub mod token;
pub mod validation;

pub use defenddb_core_types::schema;

// Re-export commonly used types
pub use buffer::CommandBuffer;
pub use builder::QueryBuilder;
pub use errors::{ExError, ExErrorKind, QueryError, Result};
pub use grammar::Query;
pub use token::{AgentId, ColumnName, CommandName, FilterValue, TableName};
pub use validation::{
    is_allowed_token, is_numeric_identifier, is_restricted_token, ALLOWED_EXTRA_CHARS,
};
