use thiserror::Error;

/// Result type alias using QueryError
pub type Result<T> = std::result::Result<T, QueryError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// One kind per validation site of the command builder. Each kind maps to a
/// stable error code that callers can match on, log, or surface in an API
/// response without parsing the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    /// Agent identifier is empty or contains a non-digit
    InvalidAgentId,
    /// Table name contains a character outside the allow-list
    InvalidTableName,
    /// Column name contains a character outside the allow-list
    InvalidColumnName,
    /// Filter value contains a character outside the allow-list
    InvalidValue,
    /// Sub-command name contains a character outside the allow-list
    InvalidCommandName,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidAgentId => "ERR_INVALID_AGENT_ID",
            ExErrorKind::InvalidTableName => "ERR_INVALID_TABLE_NAME",
            ExErrorKind::InvalidColumnName => "ERR_INVALID_COLUMN_NAME",
            ExErrorKind::InvalidValue => "ERR_INVALID_VALUE",
            ExErrorKind::InvalidCommandName => "ERR_INVALID_COMMAND_NAME",
        }
    }

    /// All kinds, in declaration order
    pub fn all() -> [ExErrorKind; 5] {
        [
            ExErrorKind::InvalidAgentId,
            ExErrorKind::InvalidTableName,
            ExErrorKind::InvalidColumnName,
            ExErrorKind::InvalidValue,
            ExErrorKind::InvalidCommandName,
        ]
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context a caller needs to reject
/// the originating request: which builder operation refused the input and
/// the offending token itself.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    token: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            token: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the rejected token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the rejected token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        // Debug formatting escapes quotes and control characters.
        if let Some(token) = &self.token {
            write!(f, " (token: {:?})", token)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Validation failures raised by the command builder
///
/// Every variant is returned before the command buffer is touched. The
/// rejected input is rendered with `{:?}` so hostile control characters
/// cannot forge extra log lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Agent identifier is not a non-empty run of decimal digits
    #[error("Invalid agent id: {agent_id:?}")]
    InvalidAgentId { agent_id: String },

    /// Table name contains a character outside the allow-list
    #[error("Invalid table name: {table:?}")]
    InvalidTableName { table: String },

    /// Column name contains a character outside the allow-list
    #[error("Invalid column name: {column:?}")]
    InvalidColumnName { column: String },

    /// Filter value contains a character outside the allow-list
    #[error("Invalid value: {value:?}")]
    InvalidValue { value: String },

    /// Sub-command name contains a character outside the allow-list
    #[error("Invalid command: {command:?}")]
    InvalidCommandName { command: String },
}

impl QueryError {
    /// Classify this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            QueryError::InvalidAgentId { .. } => ExErrorKind::InvalidAgentId,
            QueryError::InvalidTableName { .. } => ExErrorKind::InvalidTableName,
            QueryError::InvalidColumnName { .. } => ExErrorKind::InvalidColumnName,
            QueryError::InvalidValue { .. } => ExErrorKind::InvalidValue,
            QueryError::InvalidCommandName { .. } => ExErrorKind::InvalidCommandName,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The input that was refused
    pub fn rejected(&self) -> &str {
        match self {
            QueryError::InvalidAgentId { agent_id } => agent_id,
            QueryError::InvalidTableName { table } => table,
            QueryError::InvalidColumnName { column } => column,
            QueryError::InvalidValue { value } => value,
            QueryError::InvalidCommandName { command } => command,
        }
    }
}

impl From<QueryError> for ExError {
    fn from(err: QueryError) -> Self {
        let message = err.to_string();
        let kind = err.kind();
        let token = match err {
            QueryError::InvalidAgentId { agent_id } => agent_id,
            QueryError::InvalidTableName { table } => table,
            QueryError::InvalidColumnName { column } => column,
            QueryError::InvalidValue { value } => value,
            QueryError::InvalidCommandName { command } => command,
        };
        ExError::new(kind).with_token(token).with_message(message)
    }
}
