//! Canonical logging macros
//!
//! These macros give every builder operation the same event shape:
//! `component`, `op` and `event`, plus whatever fields the call site adds.

/// Log that a clause was appended to a command
///
/// # Example
///
/// ```
/// # use defenddb_query::log_clause;
/// log_clause!("select_all");
/// log_clause!("from_table", keyword = "FROM");
/// ```
#[macro_export]
macro_rules! log_clause {
    ($op:expr) => {
        tracing::trace!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_CLAUSE,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::trace!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_CLAUSE,
            $($field)*
        );
    };
}

/// Log that a token was refused
///
/// The error is converted into an `ExError` tagged with `op`, so the event
/// carries the stable kind and code plus the rendered `ExError` as
/// `err.detail`. The rejected text only appears escaped.
///
/// # Example
///
/// ```
/// # use defenddb_query::{log_reject, QueryError};
/// let err = QueryError::InvalidAgentId { agent_id: "abc".to_string() };
/// log_reject!("agent", err);
/// ```
#[macro_export]
macro_rules! log_reject {
    ($op:expr, $err:expr) => {{
        let ex_err = $crate::errors::ExError::from($err).with_op($op);
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_REJECT,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            err.detail = %ex_err,
        );
    }};
    ($op:expr, $err:expr, $($field:tt)*) => {{
        let ex_err = $crate::errors::ExError::from($err).with_op($op);
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_REJECT,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            err.detail = %ex_err,
            $($field)*
        );
    }};
}

/// Log that a command was finished
///
/// # Example
///
/// ```
/// # use defenddb_query::log_build;
/// log_build!("build", segments = 3);
/// log_build!("build", segments = 3, len = 34);
/// ```
#[macro_export]
macro_rules! log_build {
    ($op:expr, segments = $segments:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_BUILD,
            segments = $segments,
        );
    };
    ($op:expr, segments = $segments:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_BUILD,
            segments = $segments,
            $($field)*
        );
    };
}
