use crate::{Record, Value};

use indexmap::IndexMap;

/// An attribute-equality filter.
///
/// A record matches when every key in the query equals the record's value
/// for that key. A key the record lacks reads as `Null`. An empty query
/// matches every record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    clauses: IndexMap<String, Value>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality clause.
    pub fn eq(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.insert(key.into(), value.into());
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.clauses
            .iter()
            .all(|(key, value)| record.get_or_null(key) == value)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.clauses.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl From<Record> for Query {
    fn from(record: Record) -> Self {
        record.iter().fold(Query::new(), |query, (key, value)| {
            query.eq(key, value.clone())
        })
    }
}

impl From<&Record> for Query {
    fn from(record: &Record) -> Self {
        record.iter().fold(Query::new(), |query, (key, value)| {
            query.eq(key, value.clone())
        })
    }
}
