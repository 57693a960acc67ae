use crate::{Id, Result, Value};

use indexmap::IndexMap;

/// The parts of an incoming request the shorthands read.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request URL, possibly with a query string
    pub url: String,

    /// Dynamic route segments, e.g. `id` for `/contacts/:id`
    pub params: IndexMap<String, String>,

    /// Query string parameters. Repeated keys keep every value.
    pub query_params: IndexMap<String, Vec<String>>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Request {
        Request {
            url: url.into(),
            ..Request::default()
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Request {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Request {
        self.query_params
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// The `:id` route param, if present.
    pub fn id(&self) -> Result<Option<Id>> {
        match self.params.get("id") {
            Some(id) => Id::try_from(Value::from(id)).map(Some),
            None => Ok(None),
        }
    }

    /// The `ids` query param, if present. `ids[]` is accepted too.
    pub fn ids(&self) -> Result<Option<Vec<Id>>> {
        let Some(ids) = self
            .query_params
            .get("ids")
            .or_else(|| self.query_params.get("ids[]"))
        else {
            return Ok(None);
        };

        ids.iter()
            .map(|id| Id::try_from(Value::from(id)))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// The URL without its query string or trailing slash.
    pub fn path(&self) -> &str {
        let path = self.url.split('?').next().unwrap_or_default();
        path.strip_suffix('/').unwrap_or(path)
    }

    /// The resource segment of the path: the last one, or the one before
    /// it when the request carries an id.
    pub(crate) fn resource_segment(&self) -> Result<&str> {
        let path = self.path();
        let path = if self.id()?.is_some() {
            path.rsplit_once('/').map_or("", |(head, _)| head)
        } else {
            path
        };
        Ok(path.rsplit('/').next().unwrap_or(path))
    }
}
