use super::{ModelDef, Schema};
use crate::{Db, Result};

/// How the shorthand layer reacts to a route reading a collection that does
/// not exist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnknownCollectionPolicy {
    /// Return an `UnknownCollection` error.
    #[default]
    Fail,

    /// Log a warning and respond with `null` data for that key.
    Warn,
}

/// Configures and builds a [`Schema`].
///
/// ```
/// use stubdb::{Db, ModelDef, Schema, UnknownCollectionPolicy};
///
/// # fn main() -> stubdb::Result<()> {
/// let schema = Schema::builder()
///     .db(Db::from_json(r#"{"users": [{"id": 1, "name": "Link"}]}"#)?)
///     .unknown_collection(UnknownCollectionPolicy::Warn)
///     .register("user", ModelDef::new())
///     .build()?;
///
/// assert_eq!(schema.model("user")?.all()?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    db: Option<Db>,

    /// Models to register, in declaration order
    models: Vec<(String, ModelDef)>,

    unknown_collection: UnknownCollectionPolicy,
}

impl Builder {
    /// Use `db` as the backing store instead of an empty one.
    pub fn db(&mut self, db: Db) -> &mut Self {
        self.db = Some(db);
        self
    }

    pub fn unknown_collection(&mut self, policy: UnknownCollectionPolicy) -> &mut Self {
        self.unknown_collection = policy;
        self
    }

    pub fn register(&mut self, name: &str, def: ModelDef) -> &mut Self {
        self.models.push((name.to_string(), def));
        self
    }

    pub fn build(&mut self) -> Result<Schema> {
        let schema = Schema::with_policy(self.db.take().unwrap_or_default(), self.unknown_collection);
        schema.register_models(std::mem::take(&mut self.models))?;
        Ok(schema)
    }
}
