//! Validated command tokens
//!
//! Each type here can only be obtained through a fallible constructor that
//! runs the allow-list check once. Builder transitions that take these
//! types never re-validate, and no code path can hand raw text to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{QueryError, Result};
use crate::validation::{is_allowed_token, is_numeric_identifier};

/// Numeric identifier of a single agent
///
/// Kept as text so zero-padded ids such as `"001"` reach the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

impl AgentId {
    /// Validate and wrap an agent identifier
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidAgentId`] if `id` is empty or contains a
    /// non-digit.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if is_numeric_identifier(&id) {
            Ok(Self(id))
        } else {
            Err(QueryError::InvalidAgentId { agent_id: id })
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<u32> for AgentId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl TryFrom<String> for AgentId {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AgentId {
    type Error = QueryError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for AgentId {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.0
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Define a newtype over a restricted token
///
/// All restricted tokens share one validator and differ only in the error
/// variant (and its field) reported on rejection.
macro_rules! restricted_token {
    ($(#[$meta:meta])* $name:ident => $variant:ident { $field:ident }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Validate and wrap a ", stringify!($name))]
            ///
            /// # Errors
            #[doc = concat!("Returns [`QueryError::", stringify!($variant), "`] if the text")]
            /// contains anything other than ASCII letters, ASCII digits, `-`,
            /// `_` or space.
            pub fn new(text: impl Into<String>) -> Result<Self> {
                let text = text.into();
                if is_allowed_token(&text) {
                    Ok(Self(text))
                } else {
                    Err(QueryError::$variant { $field: text })
                }
            }

            /// Get the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner text
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = QueryError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = QueryError;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = QueryError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(token: $name) -> Self {
                token.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

restricted_token! {
    /// Name of a table in the store
    TableName => InvalidTableName { table }
}

restricted_token! {
    /// Name of a column used in a `WHERE`/`AND`/`OR` clause
    ColumnName => InvalidColumnName { column }
}

restricted_token! {
    /// Literal compared with `=`; written between single quotes
    FilterValue => InvalidValue { value }
}

restricted_token! {
    /// Suffix of a named `global get-`/`find-`/`select-` command
    CommandName => InvalidCommandName { command }
}
