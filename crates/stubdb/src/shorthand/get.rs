use super::{GetKey, GetOptions, Request, RouteKey};
use crate::{err, query, singularize, Collection, Db, Error, Record, Result, Schema};
use crate::{pluralize, UnknownCollectionPolicy};

use serde_json::{Map, Value as Json};
use tracing::warn;

/// Builds the payload for a GET request.
///
/// - [`GetKey::Single`]: the record with the request's `:id`, the records
///   listed in `?ids` when coalescing, or the whole collection.
/// - [`GetKey::Many`]: when the first key is singular, that record by id,
///   and for every other key the records whose `<first key>_id` matches it.
///   Otherwise every key's whole collection.
/// - [`GetKey::Inferred`]: like `Single`, with the type taken from the URL.
///   Lists are keyed by the plural type.
pub fn get(
    schema: &Schema,
    key: &GetKey,
    request: &Request,
    options: &GetOptions,
) -> Result<Map<String, Json>> {
    let policy = schema.unknown_collection_policy();
    schema.with_db(|db| {
        let reader = Reader { db, request, policy };
        match key {
            GetKey::Single(key) => reader.single(key, options),
            GetKey::Many(keys) => reader.many(keys),
            GetKey::Inferred => reader.inferred(options),
        }
    })
}

struct Reader<'a> {
    db: &'a Db,
    request: &'a Request,
    policy: UnknownCollectionPolicy,
}

impl Reader<'_> {
    fn single(&self, key: &RouteKey, options: &GetOptions) -> Result<Map<String, Json>> {
        let mut data = Map::new();
        let value = self.read(&key.collection, options)?;
        data.insert(key.key.clone(), value);
        Ok(data)
    }

    fn many(&self, keys: &[RouteKey]) -> Result<Map<String, Json>> {
        let mut data = Map::new();

        let Some((first, rest)) = keys.split_first() else {
            return Ok(data);
        };

        if !first.singular {
            for key in keys {
                let value = match self.collection(&key.collection)? {
                    Some(collection) => records(collection.all()),
                    None => Json::Null,
                };
                data.insert(key.key.clone(), value);
            }
            return Ok(data);
        }

        let owner = match (self.collection(&first.collection)?, self.request.id()?) {
            (Some(collection), Some(id)) => collection.find(id),
            _ => None,
        };
        data.insert(first.key.clone(), owner.as_ref().map_or(Json::Null, Record::to_json));

        let foreign_key = format!("{}_id", singularize(&first.key));
        for key in rest {
            let owner_id = owner.as_ref().and_then(Record::id);
            let value = match (self.collection(&key.collection)?, owner_id) {
                (Some(collection), Some(owner_id)) => {
                    records(collection.where_eq(&query! { foreign_key.as_str() => owner_id }))
                }
                (Some(_), None) => Json::Array(vec![]),
                (None, _) => Json::Null,
            };
            data.insert(key.key.clone(), value);
        }

        Ok(data)
    }

    fn inferred(&self, options: &GetOptions) -> Result<Map<String, Json>> {
        let kind = singularize(self.request.resource_segment()?);
        let collection = pluralize(&kind);

        let key = if self.request.id()?.is_some() {
            kind
        } else {
            collection.clone()
        };

        let mut data = Map::new();
        let value = self.read(&collection, options)?;
        data.insert(key, value);
        Ok(data)
    }

    /// One record by `:id`, the coalesced `?ids`, or the whole collection.
    fn read(&self, collection: &str, options: &GetOptions) -> Result<Json> {
        let Some(collection) = self.collection(collection)? else {
            return Ok(Json::Null);
        };

        if let Some(id) = self.request.id()? {
            return Ok(collection.find(id).as_ref().map_or(Json::Null, Record::to_json));
        }

        if options.coalesce {
            if let Some(ids) = self.request.ids()? {
                return Ok(records(collection.find_many(&ids)));
            }
        }

        Ok(records(collection.all()))
    }

    /// Looks up a collection, applying the unknown collection policy.
    fn collection(&self, name: &str) -> Result<Option<&Collection>> {
        if self.db.has_collection(name) {
            return self.db.collection(name).map(Some);
        }

        match self.policy {
            UnknownCollectionPolicy::Warn => {
                warn!(
                    url = %self.request.url,
                    collection = %name,
                    "route reads a collection that does not exist; create it with a fixture or an empty collection"
                );
                Ok(None)
            }
            UnknownCollectionPolicy::Fail => Err(Error::unknown_collection(name)
                .context(err!("GET {}", self.request.url))),
        }
    }
}

fn records(records: Vec<Record>) -> Json {
    Json::Array(records.iter().map(Record::to_json).collect())
}
