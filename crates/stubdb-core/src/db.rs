use crate::{Collection, Error, Record, Result};

use indexmap::IndexMap;
use tracing::debug;

/// The collection store: an in-memory set of named collections.
///
/// A `Db` is an ordinary value. Each test scenario builds its own, so
/// scenarios never share state.
#[derive(Debug, Default, Clone)]
pub struct Db {
    collections: IndexMap<String, Collection>,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store seeded with `data`, keyed by collection name.
    pub fn from_data<I, R>(data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, R)>,
        R: IntoIterator<Item = Record>,
    {
        let mut db = Self::new();
        db.load_data(data)?;
        Ok(db)
    }

    /// Builds a store seeded from a JSON object of `collection -> [record]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut db = Self::new();
        db.load_json(json)?;
        Ok(db)
    }

    /// Creates the collection if it does not exist yet.
    pub fn create_collection(&mut self, name: &str) -> &mut Collection {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(collection = name, "create collection");
                Collection::new(name)
            })
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    pub fn collection(&self, name: &str) -> Result<&Collection> {
        self.collections
            .get(name)
            .ok_or_else(|| Error::unknown_collection(name))
    }

    pub fn collection_mut(&mut self, name: &str) -> Result<&mut Collection> {
        self.collections
            .get_mut(name)
            .ok_or_else(|| Error::unknown_collection(name))
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.collections.keys().map(String::as_str)
    }

    /// Bulk-seeds collections, creating any that are missing.
    ///
    /// Records are appended in order; ids follow the usual assignment rules.
    pub fn load_data<I, R>(&mut self, data: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, R)>,
        R: IntoIterator<Item = Record>,
    {
        for (name, records) in data {
            let collection = self.create_collection(&name);
            collection
                .insert_many(records)
                .map_err(|err| err.context(crate::err!("failed to load `{name}` fixtures")))?;
        }
        Ok(())
    }

    /// Like [`Db::load_data`], reading fixtures from a JSON object.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let data: IndexMap<String, Vec<Record>> = serde_json::from_str(json)?;
        self.load_data(data)
    }

    /// Removes every record, keeping the collections themselves.
    pub fn empty_data(&mut self) {
        for collection in self.collections.values_mut() {
            collection.clear();
        }
    }
}
