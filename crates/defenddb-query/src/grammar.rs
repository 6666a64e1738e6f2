//! Typestate command builder
//!
//! `Query<S>` follows the command grammar
//!
//! ```text
//! Command   = Scope DirectQuery | NamedSubCommand
//! Scope     = "global sql" | "agent" id "sql"
//! Direct    = "SELECT *" "FROM" table [Predicate]
//! Predicate = "WHERE" column Test { ("AND" | "OR") column Test }
//! Test      = "IS NULL" | "IS NOT NULL" | "=" 'value'
//! ```
//!
//! Each state only exposes the transitions the grammar allows, and `build`
//! only exists on states where the command is complete. Named sub-commands
//! carry their own `global`/`agent <id>` prefix, so they start from an
//! empty query. Every argument is a validated token, which makes each
//! transition infallible; the fallible step is constructing the token.
//!
//! ```
//! use defenddb_query::grammar::Query;
//! use defenddb_query::{ColumnName, FilterValue, TableName};
//!
//! # fn main() -> defenddb_query::Result<()> {
//! let command = Query::new()
//!     .global()
//!     .select_all()
//!     .from_table(&TableName::new("users")?)
//!     .where_column(&ColumnName::new("status")?)
//!     .equals_to(&FilterValue::new("active")?)
//!     .build();
//! assert_eq!(command, "global sql SELECT * FROM users WHERE status = 'active' ");
//! # Ok(())
//! # }
//! ```
//!
//! Out-of-order calls do not compile:
//!
//! ```compile_fail
//! use defenddb_query::grammar::Query;
//!
//! let _ = Query::new().is_null();
//! ```
//!
//! ```compile_fail
//! use defenddb_query::grammar::Query;
//!
//! // SELECT without FROM is not a complete command.
//! let _ = Query::new().global().select_all().build();
//! ```

use std::marker::PhantomData;

use crate::buffer::{AgentResource, CommandBuffer, GlobalVerb};
use crate::token::{AgentId, ColumnName, CommandName, FilterValue, TableName};
use crate::{log_build, log_clause};

/// Nothing written yet
#[derive(Debug, Clone, Copy)]
pub enum Empty {}
/// Scope chosen, waiting for `SELECT *`
#[derive(Debug, Clone, Copy)]
pub enum Scoped {}
/// `SELECT *` written, waiting for `FROM`
#[derive(Debug, Clone, Copy)]
pub enum Selected {}
/// `FROM <table>` written; complete, may add a `WHERE`
#[derive(Debug, Clone, Copy)]
pub enum FromTable {}
/// A column was named, waiting for its test
#[derive(Debug, Clone, Copy)]
pub enum Predicate {}
/// A test was written; complete, may chain `AND`/`OR`
#[derive(Debug, Clone, Copy)]
pub enum Condition {}
/// A named sub-command was written; complete
#[derive(Debug, Clone, Copy)]
pub enum SubCommand {}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::FromTable {}
    impl Sealed for super::Condition {}
    impl Sealed for super::SubCommand {}
}

/// States in which the command is complete and may be built
pub trait Terminal: sealed::Sealed {}

impl Terminal for FromTable {}
impl Terminal for Condition {}
impl Terminal for SubCommand {}

/// Command under construction in grammar state `S`
#[derive(Debug, Clone)]
pub struct Query<S> {
    buffer: CommandBuffer,
    _state: PhantomData<S>,
}

impl<S> Query<S> {
    fn advance<T>(self) -> Query<T> {
        Query {
            buffer: self.buffer,
            _state: PhantomData,
        }
    }

    /// Command text accumulated so far
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }
}

impl Query<Empty> {
    pub fn new() -> Self {
        Self {
            buffer: CommandBuffer::new(),
            _state: PhantomData,
        }
    }

    /// Target the whole fleet: `global sql`
    pub fn global(mut self) -> Query<Scoped> {
        self.buffer.global_scope();
        log_clause!("global", keyword = "global sql");
        self.advance()
    }

    /// Target one agent: `agent <id> sql`
    pub fn agent(mut self, id: &AgentId) -> Query<Scoped> {
        self.buffer.agent_scope(id);
        log_clause!("agent", keyword = "agent sql");
        self.advance()
    }

    /// `global get-<command>`
    pub fn global_get(self, command: &CommandName) -> Query<SubCommand> {
        self.global_command("global_get", GlobalVerb::Get, command)
    }

    /// `global find-<command>`
    pub fn global_find(self, command: &CommandName) -> Query<SubCommand> {
        self.global_command("global_find", GlobalVerb::Find, command)
    }

    /// `global select-<command>`
    pub fn global_select(self, command: &CommandName) -> Query<SubCommand> {
        self.global_command("global_select", GlobalVerb::Select, command)
    }

    /// `agent <id> osinfo get`
    pub fn agent_os_info(self, id: &AgentId) -> Query<SubCommand> {
        self.agent_command("agent_os_info", id, AgentResource::OsInfo)
    }

    /// `agent <id> hotfix get`
    pub fn agent_hotfixes(self, id: &AgentId) -> Query<SubCommand> {
        self.agent_command("agent_hotfixes", id, AgentResource::Hotfix)
    }

    /// `agent <id> package get`
    pub fn agent_packages(self, id: &AgentId) -> Query<SubCommand> {
        self.agent_command("agent_packages", id, AgentResource::Package)
    }

    fn global_command(
        mut self,
        op: &'static str,
        verb: GlobalVerb,
        command: &CommandName,
    ) -> Query<SubCommand> {
        self.buffer.global_command(verb, command);
        log_clause!(op, keyword = "global");
        self.advance()
    }

    fn agent_command(
        mut self,
        op: &'static str,
        id: &AgentId,
        resource: AgentResource,
    ) -> Query<SubCommand> {
        self.buffer.agent_command(id, resource);
        log_clause!(op, keyword = "agent");
        self.advance()
    }
}

impl Default for Query<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl Query<Scoped> {
    /// `SELECT *`
    pub fn select_all(mut self) -> Query<Selected> {
        self.buffer.select_all();
        log_clause!("select_all", keyword = "SELECT *");
        self.advance()
    }
}

impl Query<Selected> {
    /// `FROM <table>`
    pub fn from_table(mut self, table: &TableName) -> Query<FromTable> {
        self.buffer.from_table(table);
        log_clause!("from_table", keyword = "FROM");
        self.advance()
    }
}

impl Query<FromTable> {
    /// `WHERE <column>`
    pub fn where_column(mut self, column: &ColumnName) -> Query<Predicate> {
        self.buffer.where_column(column);
        log_clause!("where_column", keyword = "WHERE");
        self.advance()
    }
}

impl Query<Predicate> {
    /// `IS NULL`
    pub fn is_null(mut self) -> Query<Condition> {
        self.buffer.is_null();
        log_clause!("is_null", keyword = "IS NULL");
        self.advance()
    }

    /// `IS NOT NULL`
    pub fn is_not_null(mut self) -> Query<Condition> {
        self.buffer.is_not_null();
        log_clause!("is_not_null", keyword = "IS NOT NULL");
        self.advance()
    }

    /// `= '<value>'`
    pub fn equals_to(mut self, value: &FilterValue) -> Query<Condition> {
        self.buffer.equals_to(value);
        log_clause!("equals_to", keyword = "=");
        self.advance()
    }
}

impl Query<Condition> {
    /// `AND <column>`
    pub fn and_column(mut self, column: &ColumnName) -> Query<Predicate> {
        self.buffer.and_column(column);
        log_clause!("and_column", keyword = "AND");
        self.advance()
    }

    /// `OR <column>`
    pub fn or_column(mut self, column: &ColumnName) -> Query<Predicate> {
        self.buffer.or_column(column);
        log_clause!("or_column", keyword = "OR");
        self.advance()
    }
}

impl<S: Terminal> Query<S> {
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
