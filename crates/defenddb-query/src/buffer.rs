//! Append-only command buffer and the clauses it can hold
//!
//! Both builders write through the clause methods here, so a given clause
//! has exactly one textual form on the wire.

use crate::token::{AgentId, ColumnName, CommandName, FilterValue, TableName};

/// Growing text of the command under construction
///
/// Every clause is written as its words separated by single spaces and
/// followed by one trailing space. The store tokenizes commands
/// positionally on whitespace, so this spacing is part of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    text: String,
    segments: usize,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current command text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the command text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of clauses appended so far
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Append one clause made of `words`
    fn push_clause(&mut self, words: &[&str]) {
        for word in words {
            self.text.push_str(word);
            self.text.push(' ');
        }
        self.segments += 1;
    }

    // ===== Scope =====

    pub(crate) fn global_scope(&mut self) {
        self.push_clause(&["global", "sql"]);
    }

    pub(crate) fn agent_scope(&mut self, id: &AgentId) {
        self.push_clause(&["agent", id.as_str(), "sql"]);
    }

    // ===== Direct query =====

    pub(crate) fn select_all(&mut self) {
        self.push_clause(&["SELECT", "*"]);
    }

    pub(crate) fn from_table(&mut self, table: &TableName) {
        self.push_clause(&["FROM", table.as_str()]);
    }

    pub(crate) fn where_column(&mut self, column: &ColumnName) {
        self.push_clause(&["WHERE", column.as_str()]);
    }

    pub(crate) fn is_null(&mut self) {
        self.push_clause(&["IS", "NULL"]);
    }

    pub(crate) fn is_not_null(&mut self) {
        self.push_clause(&["IS", "NOT", "NULL"]);
    }

    pub(crate) fn equals_to(&mut self, value: &FilterValue) {
        let quoted = format!("'{}'", value.as_str());
        self.push_clause(&["=", &quoted]);
    }

    pub(crate) fn and_column(&mut self, column: &ColumnName) {
        self.push_clause(&["AND", column.as_str()]);
    }

    pub(crate) fn or_column(&mut self, column: &ColumnName) {
        self.push_clause(&["OR", column.as_str()]);
    }

    // ===== Named sub-commands =====

    pub(crate) fn global_command(&mut self, verb: GlobalVerb, command: &CommandName) {
        let name = format!("{}-{}", verb.as_str(), command.as_str());
        self.push_clause(&["global", &name]);
    }

    pub(crate) fn agent_command(&mut self, id: &AgentId, resource: AgentResource) {
        self.push_clause(&["agent", id.as_str(), resource.as_str(), "get"]);
    }
}

/// Verb prefix of a named `global` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GlobalVerb {
    Get,
    Find,
    Select,
}

impl GlobalVerb {
    fn as_str(self) -> &'static str {
        match self {
            GlobalVerb::Get => "get",
            GlobalVerb::Find => "find",
            GlobalVerb::Select => "select",
        }
    }
}

/// Inventory resource fetched by a named `agent` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AgentResource {
    OsInfo,
    Hotfix,
    Package,
}

impl AgentResource {
    fn as_str(self) -> &'static str {
        match self {
            AgentResource::OsInfo => "osinfo",
            AgentResource::Hotfix => "hotfix",
            AgentResource::Package => "package",
        }
    }
}
