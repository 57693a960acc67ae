//! Route shorthands: build a response payload for a request straight from
//! the store, without writing a handler.
//!
//! ```
//! use stubdb::shorthand::{self, GetKey, GetOptions, Request};
//! use stubdb::{Db, Schema};
//!
//! # fn main() -> stubdb::Result<()> {
//! let schema = Schema::new(Db::from_json(r#"{"contacts": [{"id": 1, "name": "Link"}]}"#)?);
//!
//! let request = Request::new("/contacts/1").param("id", "1");
//! let data = shorthand::get(&schema, &GetKey::from_key("contact"), &request, &GetOptions::default())?;
//!
//! assert_eq!(data["contact"]["name"], "Link");
//! # Ok(())
//! # }
//! ```

mod get;
pub use get::get;

mod request;
pub use request::Request;

use stubdb_core::{is_singular, pluralize};

/// What a GET route returns, decided once when the route is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetKey {
    /// One key, e.g. `"contact"` or `"contacts"`.
    Single(RouteKey),

    /// Several keys, e.g. `["contact", "addresses"]`. When the first is
    /// singular, the rest are filtered to records owned by it.
    Many(Vec<RouteKey>),

    /// No key; the type comes from the request URL.
    Inferred,
}

/// A payload key and the collection it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteKey {
    /// Key in the response payload
    pub key: String,

    /// Collection backing the key
    pub collection: String,

    /// Whether `key` names a single record
    pub singular: bool,
}

/// Per-route options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GetOptions {
    /// Answer `?ids=1&ids=2` requests with just those records.
    pub coalesce: bool,
}

impl GetKey {
    pub fn from_key(key: &str) -> GetKey {
        GetKey::Single(RouteKey::new(key))
    }

    pub fn from_keys<I, S>(keys: I) -> GetKey
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        GetKey::Many(keys.into_iter().map(|key| RouteKey::new(key.as_ref())).collect())
    }
}

impl RouteKey {
    /// Classifies `key` by its inflection. Uncountable words such as `sheep`
    /// classify as singular; use [`RouteKey::plural`] for those.
    pub fn new(key: &str) -> RouteKey {
        RouteKey {
            key: key.to_string(),
            collection: pluralize(key),
            singular: is_singular(key),
        }
    }

    pub fn singular(key: &str) -> RouteKey {
        RouteKey {
            singular: true,
            ..RouteKey::new(key)
        }
    }

    pub fn plural(key: &str) -> RouteKey {
        RouteKey {
            singular: false,
            ..RouteKey::new(key)
        }
    }
}

impl From<&str> for GetKey {
    fn from(key: &str) -> GetKey {
        GetKey::from_key(key)
    }
}
