//! Canonical schema constants for structured logging and events
//!
//! These constants keep the query builder's events consistent with
//! whatever subscriber the embedding application installs.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Command identifiers
pub const FIELD_KEYWORD: &str = "keyword";
pub const FIELD_COMMAND: &str = "command";

// Buffer sizes
pub const FIELD_SEGMENTS: &str = "segments";
pub const FIELD_LEN: &str = "len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";
pub const FIELD_ERR_DETAIL: &str = "err.detail";

// Canonical event names
pub const EVENT_CLAUSE: &str = "clause";
pub const EVENT_REJECT: &str = "reject";
pub const EVENT_BUILD: &str = "build";
