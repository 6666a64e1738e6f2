//! Flat fluent command builder
//!
//! `QueryBuilder` takes raw text, validates each argument on the spot and
//! appends clauses in whatever order it is called. Call order is the
//! caller's responsibility here; see [`crate::grammar::Query`] for the
//! variant that only allows well-formed commands.
//!
//! ```
//! use defenddb_query::QueryBuilder;
//!
//! # fn main() -> defenddb_query::Result<()> {
//! let mut query = QueryBuilder::new();
//! query
//!     .global()
//!     .select_all()
//!     .from_table("agent")?
//!     .where_column("connection_status")?
//!     .equals_to("active")?;
//! assert_eq!(
//!     query.build(),
//!     "global sql SELECT * FROM agent WHERE connection_status = 'active' "
//! );
//! # Ok(())
//! # }
//! ```

use crate::buffer::{AgentResource, CommandBuffer, GlobalVerb};
use crate::errors::{QueryError, Result};
use crate::token::{AgentId, ColumnName, CommandName, FilterValue, TableName};
use crate::{log_build, log_clause, log_reject};

/// Fluent builder for DefendDB command strings
///
/// Every token-taking method validates before writing: on error the buffer
/// is exactly as it was before the call.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    buffer: CommandBuffer,
}

/// Log a rejected token and pass the result through
fn checked<T>(op: &'static str, result: Result<T>) -> Result<T> {
    result.map_err(|err: QueryError| {
        log_reject!(op, err.clone());
        err
    })
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static factory, equivalent to [`QueryBuilder::new`]
    pub fn builder() -> Self {
        Self::new()
    }

    /// Target the whole fleet: `global sql`
    pub fn global(&mut self) -> &mut Self {
        self.buffer.global_scope();
        log_clause!("global", keyword = "global sql");
        self
    }

    /// Target one agent: `agent <id> sql`
    ///
    /// # Errors
    /// [`QueryError::InvalidAgentId`] unless `id` is a non-empty run of digits.
    pub fn agent(&mut self, id: &str) -> Result<&mut Self> {
        let id = checked("agent", AgentId::new(id))?;
        self.buffer.agent_scope(&id);
        log_clause!("agent", keyword = "agent sql");
        Ok(self)
    }

    /// `SELECT *`
    pub fn select_all(&mut self) -> &mut Self {
        self.buffer.select_all();
        log_clause!("select_all", keyword = "SELECT *");
        self
    }

    /// `FROM <table>`
    ///
    /// # Errors
    /// [`QueryError::InvalidTableName`] if `table` leaves the allow-list.
    pub fn from_table(&mut self, table: &str) -> Result<&mut Self> {
        let table = checked("from_table", TableName::new(table))?;
        self.buffer.from_table(&table);
        log_clause!("from_table", keyword = "FROM");
        Ok(self)
    }

    /// `WHERE <column>`
    ///
    /// # Errors
    /// [`QueryError::InvalidColumnName`] if `column` leaves the allow-list.
    pub fn where_column(&mut self, column: &str) -> Result<&mut Self> {
        let column = checked("where_column", ColumnName::new(column))?;
        self.buffer.where_column(&column);
        log_clause!("where_column", keyword = "WHERE");
        Ok(self)
    }

    /// `IS NULL`
    pub fn is_null(&mut self) -> &mut Self {
        self.buffer.is_null();
        log_clause!("is_null", keyword = "IS NULL");
        self
    }

    /// `IS NOT NULL`
    pub fn is_not_null(&mut self) -> &mut Self {
        self.buffer.is_not_null();
        log_clause!("is_not_null", keyword = "IS NOT NULL");
        self
    }

    /// `= '<value>'`
    ///
    /// # Errors
    /// [`QueryError::InvalidValue`] if `value` leaves the allow-list.
    pub fn equals_to(&mut self, value: &str) -> Result<&mut Self> {
        let value = checked("equals_to", FilterValue::new(value))?;
        self.buffer.equals_to(&value);
        log_clause!("equals_to", keyword = "=");
        Ok(self)
    }

    /// `AND <column>`
    ///
    /// # Errors
    /// [`QueryError::InvalidColumnName`] if `column` leaves the allow-list.
    pub fn and_column(&mut self, column: &str) -> Result<&mut Self> {
        let column = checked("and_column", ColumnName::new(column))?;
        self.buffer.and_column(&column);
        log_clause!("and_column", keyword = "AND");
        Ok(self)
    }

    /// `OR <column>`
    ///
    /// # Errors
    /// [`QueryError::InvalidColumnName`] if `column` leaves the allow-list.
    pub fn or_column(&mut self, column: &str) -> Result<&mut Self> {
        let column = checked("or_column", ColumnName::new(column))?;
        self.buffer.or_column(&column);
        log_clause!("or_column", keyword = "OR");
        Ok(self)
    }

    /// `global get-<command>`
    ///
    /// # Errors
    /// [`QueryError::InvalidCommandName`] if `command` leaves the allow-list.
    pub fn global_get_command(&mut self, command: &str) -> Result<&mut Self> {
        self.global_command("global_get_command", GlobalVerb::Get, command)
    }

    /// `global find-<command>`
    ///
    /// # Errors
    /// [`QueryError::InvalidCommandName`] if `command` leaves the allow-list.
    pub fn global_find_command(&mut self, command: &str) -> Result<&mut Self> {
        self.global_command("global_find_command", GlobalVerb::Find, command)
    }

    /// `global select-<command>`
    ///
    /// # Errors
    /// [`QueryError::InvalidCommandName`] if `command` leaves the allow-list.
    pub fn global_select_command(&mut self, command: &str) -> Result<&mut Self> {
        self.global_command("global_select_command", GlobalVerb::Select, command)
    }

    /// `agent <id> osinfo get`
    ///
    /// # Errors
    /// [`QueryError::InvalidAgentId`] unless `id` is a non-empty run of digits.
    pub fn agent_get_os_info_command(&mut self, id: &str) -> Result<&mut Self> {
        self.agent_command("agent_get_os_info_command", id, AgentResource::OsInfo)
    }

    /// `agent <id> hotfix get`
    ///
    /// # Errors
    /// [`QueryError::InvalidAgentId`] unless `id` is a non-empty run of digits.
    pub fn agent_get_hotfixes_command(&mut self, id: &str) -> Result<&mut Self> {
        self.agent_command("agent_get_hotfixes_command", id, AgentResource::Hotfix)
    }

    /// `agent <id> package get`
    ///
    /// # Errors
    /// [`QueryError::InvalidAgentId`] unless `id` is a non-empty run of digits.
    pub fn agent_get_packages_command(&mut self, id: &str) -> Result<&mut Self> {
        self.agent_command("agent_get_packages_command", id, AgentResource::Package)
    }

    fn global_command(
        &mut self,
        op: &'static str,
        verb: GlobalVerb,
        command: &str,
    ) -> Result<&mut Self> {
        let command = checked(op, CommandName::new(command))?;
        self.buffer.global_command(verb, &command);
        log_clause!(op, keyword = "global");
        Ok(self)
    }

    fn agent_command(
        &mut self,
        op: &'static str,
        id: &str,
        resource: AgentResource,
    ) -> Result<&mut Self> {
        let id = checked(op, AgentId::new(id))?;
        self.buffer.agent_command(&id, resource);
        log_clause!(op, keyword = "agent");
        Ok(self)
    }

    /// Command text accumulated so far
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// Number of clauses appended so far
    pub fn segments(&self) -> usize {
        self.buffer.segments()
    }

    /// Finish the command and hand back its text
    pub fn build(self) -> String {
        log_build!(
            "build",
            segments = self.buffer.segments(),
            len = self.buffer.len(),
            command = self.buffer.as_str(),
        );
        self.buffer.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builder_is_empty() {
        let query = QueryBuilder::new();
        assert_eq!(query.as_str(), "");
        assert_eq!(query.segments(), 0);
        assert_eq!(QueryBuilder::builder().build(), "");
    }

    #[test]
    fn test_global_select_from() {
        let mut query = QueryBuilder::new();
        query.global().select_all().from_table("users").unwrap();
        assert_eq!(query.build(), "global sql SELECT * FROM users ");
    }

    #[test]
    fn test_agent_select_from() {
        let mut query = QueryBuilder::new();
        query
            .agent("42")
            .unwrap()
            .select_all()
            .from_table("packages")
            .unwrap();
        assert_eq!(query.build(), "agent 42 sql SELECT * FROM packages ");
    }

    #[test]
    fn test_rejected_agent_leaves_buffer_empty() {
        let mut query = QueryBuilder::new();
        let err = query.agent("abc").unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidAgentId {
                agent_id: "abc".to_string()
            }
        );
        assert_eq!(query.as_str(), "");
        assert_eq!(query.segments(), 0);
    }

    #[test]
    fn test_rejected_table_leaves_buffer_unchanged() {
        let mut query = QueryBuilder::new();
        query.global().select_all();
        let err = query.from_table("users;DROP").unwrap_err();
        assert!(matches!(err, QueryError::InvalidTableName { .. }));
        assert_eq!(query.as_str(), "global sql SELECT * ");
    }

    #[test]
    fn test_redundant_scope_is_not_deduplicated() {
        let mut query = QueryBuilder::new();
        query.global().global_get_command("config").unwrap();
        assert_eq!(query.build(), "global sql global get-config ");
    }
}
