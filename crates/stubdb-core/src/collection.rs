use crate::{Error, Id, Query, Record, Result};

use tracing::debug;

/// A named, ordered list of records sharing one id space.
///
/// Records without an id get `max(existing ids) + 1` on insert, starting at
/// 1. Every read returns copies; callers never hold references into the
/// collection across mutations.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    records: Vec<Record>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts a record, assigning it an id if it has none.
    ///
    /// Returns the stored record, including its id.
    pub fn insert(&mut self, mut record: Record) -> Result<Record> {
        let id = match record.get("id") {
            Some(value) if !value.is_null() => {
                let id = Id::try_from(value)?;
                if self.position(id).is_some() {
                    return Err(Error::duplicate_id(&self.name, id));
                }
                id
            }
            _ => self.next_id(),
        };

        record.set_id(id);
        debug!(collection = %self.name, %id, "insert record");
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn insert_many(&mut self, records: impl IntoIterator<Item = Record>) -> Result<Vec<Record>> {
        records
            .into_iter()
            .map(|record| self.insert(record))
            .collect()
    }

    pub fn find(&self, id: Id) -> Option<Record> {
        self.position(id).map(|index| self.records[index].clone())
    }

    /// Finds every record whose id is in `ids`, in the order of `ids`.
    ///
    /// Ids with no matching record are skipped.
    pub fn find_many(&self, ids: &[Id]) -> Vec<Record> {
        ids.iter().filter_map(|id| self.find(*id)).collect()
    }

    pub fn where_eq(&self, query: &Query) -> Vec<Record> {
        self.filter(|record| query.matches(record))
    }

    pub fn filter(&self, mut predicate: impl FnMut(&Record) -> bool) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub fn first(&self) -> Option<Record> {
        self.records.first().cloned()
    }

    pub fn all(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// Merges `attrs` into the record with the given id.
    ///
    /// An `id` key in `attrs` is ignored; ids never change once assigned.
    pub fn update(&mut self, id: Id, attrs: &Record) -> Result<Record> {
        let index = self.position(id).ok_or_else(|| {
            Error::record_not_found(format!("collection={} id={}", self.name, id))
        })?;

        debug!(collection = %self.name, %id, "update record");
        Ok(Self::merge_into(&mut self.records[index], attrs))
    }

    pub fn update_where(&mut self, query: &Query, attrs: &Record) -> Vec<Record> {
        self.records
            .iter_mut()
            .filter(|record| query.matches(record))
            .map(|record| Self::merge_into(record, attrs))
            .collect()
    }

    pub fn update_all(&mut self, attrs: &Record) -> Vec<Record> {
        self.update_where(&Query::new(), attrs)
    }

    pub fn remove(&mut self, id: Id) -> Result<Record> {
        let index = self.position(id).ok_or_else(|| {
            Error::record_not_found(format!("collection={} id={}", self.name, id))
        })?;

        debug!(collection = %self.name, %id, "remove record");
        Ok(self.records.remove(index))
    }

    /// Removes every record matching `query`, returning them in order.
    pub fn remove_where(&mut self, query: &Query) -> Vec<Record> {
        let (removed, kept) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|record| query.matches(record));
        self.records = kept;
        removed
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn position(&self, id: Id) -> Option<usize> {
        self.records.iter().position(|record| record.id() == Some(id))
    }

    fn next_id(&self) -> Id {
        self.records
            .iter()
            .filter_map(Record::id)
            .max()
            .map_or(Id(1), |id| Id(id.0 + 1))
    }

    fn merge_into(record: &mut Record, attrs: &Record) -> Record {
        for (key, value) in attrs.iter() {
            if key != "id" {
                record.insert(key, value.clone());
            }
        }
        record.clone()
    }
}
