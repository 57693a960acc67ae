use crate::{Id, Value};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw attribute map stored in a [`Collection`](crate::Collection).
///
/// Records carry no behavior. Keys keep their insertion order for display and
/// serialization, but equality ignores order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    attrs: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record's id, if it has an integer `id` attribute.
    pub fn id(&self) -> Option<Id> {
        self.attrs.get("id").and_then(Value::as_i64).map(Id)
    }

    pub fn set_id(&mut self, id: Id) {
        self.attrs.insert("id".to_string(), id.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Reads `key`, treating a missing attribute as `Null`.
    pub fn get_or_null(&self, key: &str) -> &Value {
        const NULL: Value = Value::Null;
        self.attrs.get(key).unwrap_or(&NULL)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attrs.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attrs.shift_remove(key)
    }

    /// Copies every attribute of `other` into `self`, overwriting existing
    /// keys.
    pub fn merge(&mut self, other: &Record) {
        for (key, value) in &other.attrs {
            self.attrs.insert(key.clone(), value.clone());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.attrs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.attrs.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Converts the record into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.attrs
                .iter()
                .map(|(key, value)| (key.clone(), value_to_json(value)))
                .collect(),
        )
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(v) => (*v).into(),
        Value::I64(v) => (*v).into(),
        Value::F64(v) => (*v).into(),
        Value::String(v) => v.clone().into(),
        Value::List(items) => items.iter().map(value_to_json).collect(),
        Value::Null => serde_json::Value::Null,
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attrs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
