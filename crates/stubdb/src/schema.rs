pub mod app;

mod builder;
pub use builder::{Builder, UnknownCollectionPolicy};

mod model_def;
pub use model_def::ModelDef;

use crate::{Db, Error, ModelClass, Name, Record, Result};

use indexmap::IndexMap;
use tracing::debug;

use std::cell::RefCell;
use std::rc::Rc;

/// The model registry and the entry point for reading and writing data.
///
/// `Schema` is a cheap handle: clones share the same store and registry.
/// Every [`Model`](crate::Model) keeps a clone to resolve its associations.
/// The store is single-threaded; a `Schema` cannot leave the thread that
/// built it.
#[derive(Clone)]
pub struct Schema {
    shared: Rc<Shared>,
}

struct Shared {
    db: RefCell<Db>,
    models: RefCell<IndexMap<String, Rc<app::Model>>>,
    unknown_collection: UnknownCollectionPolicy,
}

impl Schema {
    /// Creates a schema backed by `db`, with no models registered.
    pub fn new(db: Db) -> Schema {
        Schema::with_policy(db, UnknownCollectionPolicy::default())
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn with_policy(db: Db, unknown_collection: UnknownCollectionPolicy) -> Schema {
        Schema {
            shared: Rc::new(Shared {
                db: RefCell::new(db),
                models: RefCell::new(IndexMap::new()),
                unknown_collection,
            }),
        }
    }

    /// Registers a model type under `name`.
    ///
    /// The backing collection (the pluralized name) is created in the store
    /// if it does not exist yet. Association targets are resolved when they
    /// are first used, so models may be registered in any order.
    pub fn register_model(&self, name: &str, def: ModelDef) -> Result<()> {
        let model = app::Model::from_def(name, &def)?;
        let key = model.name.snake_case();

        if self.shared.models.borrow().contains_key(&key) {
            return Err(Error::duplicate_registration(key));
        }

        debug!(model = %key, collection = %model.collection, "register model");
        self.shared
            .db
            .borrow_mut()
            .create_collection(&model.collection);
        self.shared.models.borrow_mut().insert(key, Rc::new(model));
        Ok(())
    }

    pub fn register_models<I, S>(&self, models: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, ModelDef)>,
        S: AsRef<str>,
    {
        for (name, def) in models {
            self.register_model(name.as_ref(), def)?;
        }
        Ok(())
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.shared
            .models
            .borrow()
            .contains_key(&Name::new(name).snake_case())
    }

    /// Returns the factory for the model registered under `name`.
    pub fn model(&self, name: &str) -> Result<ModelClass> {
        Ok(ModelClass::from_parts(self.clone(), self.app_model(name)?))
    }

    pub(crate) fn app_model(&self, name: &str) -> Result<Rc<app::Model>> {
        self.shared
            .models
            .borrow()
            .get(&Name::new(name).snake_case())
            .cloned()
            .ok_or_else(|| Error::unknown_model(name))
    }

    pub fn unknown_collection_policy(&self) -> UnknownCollectionPolicy {
        self.shared.unknown_collection
    }

    /// Runs `f` with shared access to the store.
    ///
    /// `f` must not call back into the schema or its models.
    pub fn with_db<R>(&self, f: impl FnOnce(&Db) -> R) -> R {
        f(&self.shared.db.borrow())
    }

    /// Runs `f` with exclusive access to the store.
    ///
    /// `f` must not call back into the schema or its models.
    pub fn with_db_mut<R>(&self, f: impl FnOnce(&mut Db) -> R) -> R {
        f(&mut self.shared.db.borrow_mut())
    }

    /// Bulk-seeds the store. See [`Db::load_data`].
    pub fn load_data<I, R>(&self, data: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, R)>,
        R: IntoIterator<Item = Record>,
    {
        self.with_db_mut(|db| db.load_data(data))
    }

    /// Bulk-seeds the store from JSON. See [`Db::load_json`].
    pub fn load_json(&self, json: &str) -> Result<()> {
        self.with_db_mut(|db| db.load_json(json))
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Schema")
            .field("models", &self.shared.models.borrow().keys().collect::<Vec<_>>())
            .field("unknown_collection", &self.shared.unknown_collection)
            .finish()
    }
}
