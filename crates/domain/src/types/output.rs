//! Operation results and match input
//!
//! Each operation returns a tagged variant matching the requested output
//! shape, instead of a dynamically typed value inspected at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Result of a lookup call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LookupOutput {
    /// Raw decoded text (json-ld or turtle).
    Text(String),
    /// Tabular shape of the entity record.
    Table(Table),
}

impl LookupOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Text(_) => None,
        }
    }
}

/// Result of a search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchOutput {
    /// Raw decoded text (json or xml).
    Text(String),
    /// One table, for a specific entity type.
    Table(Table),
    /// One table per category, for the all-types search.
    Categories(BTreeMap<String, Table>),
}

impl SearchOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_categories(&self) -> Option<&BTreeMap<String, Table>> {
        match self {
            Self::Categories(tables) => Some(tables),
            _ => None,
        }
    }
}

/// Result of a match call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutput {
    /// Raw decoded text, when raw output was requested.
    Text(String),
    /// Tabular shape of the match response.
    Table(Table),
}

impl MatchOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Text(_) => None,
        }
    }
}

/// Input records for the inline match operation.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchInput {
    /// Pre-serialized delimited text, header row included.
    Text(String),
    /// Tabular records, serialized to delimited text before sending.
    Table(Table),
}

impl From<&str> for MatchInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for MatchInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Table> for MatchInput {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}
