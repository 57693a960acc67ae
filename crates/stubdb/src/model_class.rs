use crate::schema::app;
use crate::{Collection, Id, Model, Query, Record, Result, Schema};

use std::fmt;
use std::rc::Rc;

/// The per-type factory returned by [`Schema::model`].
///
/// Every model it returns is bound to the schema's store.
#[derive(Clone)]
pub struct ModelClass {
    schema: Schema,
    model: Rc<app::Model>,
}

impl ModelClass {
    pub(crate) fn from_parts(schema: Schema, model: Rc<app::Model>) -> ModelClass {
        ModelClass { schema, model }
    }

    pub fn name(&self) -> String {
        self.model.name.snake_case()
    }

    pub fn collection_name(&self) -> &str {
        &self.model.collection
    }

    /// Builds an unsaved model.
    ///
    /// Every `belongs_to` foreign key starts out `null` unless `attrs`
    /// supplies it.
    pub fn new(&self, attrs: Record) -> Result<Model> {
        Model::new_unsaved(self.schema.clone(), self.model.clone(), attrs)
    }

    /// Builds a model and saves it.
    pub fn create(&self, attrs: Record) -> Result<Model> {
        self.new(attrs)?.save()
    }

    pub fn find(&self, id: impl Into<Id>) -> Result<Option<Model>> {
        let id = id.into();
        let found = self.read(|collection| collection.find(id).into_iter().collect())?;
        Ok(found.into_iter().next())
    }

    /// Finds the models with the given ids, skipping ids with no record.
    pub fn find_many(&self, ids: &[Id]) -> Result<Vec<Model>> {
        self.read(|collection| collection.find_many(ids))
    }

    pub fn all(&self) -> Result<Vec<Model>> {
        self.read(Collection::all)
    }

    pub fn first(&self) -> Result<Option<Model>> {
        let found = self.read(|collection| collection.first().into_iter().collect())?;
        Ok(found.into_iter().next())
    }

    /// Models whose attributes equal every value in `query`.
    pub fn filter_by(&self, query: impl Into<Query>) -> Result<Vec<Model>> {
        let query = query.into();
        self.read(|collection| collection.where_eq(&query))
    }

    pub fn filter(&self, predicate: impl FnMut(&Record) -> bool) -> Result<Vec<Model>> {
        self.read(|collection| collection.filter(predicate))
    }

    fn read(&self, f: impl FnOnce(&Collection) -> Vec<Record>) -> Result<Vec<Model>> {
        let records = self
            .schema
            .with_db(|db| db.collection(&self.model.collection).map(f))?;

        Ok(records
            .into_iter()
            .map(|record| Model::from_record(self.schema.clone(), self.model.clone(), record))
            .collect())
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("ModelClass")
            .field("name", &self.model.name.snake_case())
            .field("collection", &self.model.collection)
            .finish()
    }
}
