//! An in-memory database and ORM for simulating a backend API in tests.
//!
//! A [`Schema`] owns a [`Db`] of named collections and a registry of model
//! types. Models declare `belongs_to` and `has_many` associations; the
//! schema hands out [`Model`] handles whose association accessors keep
//! foreign keys consistent across saved and unsaved records.
//!
//! ```
//! use stubdb::{record, ModelDef, Schema};
//!
//! # fn main() -> stubdb::Result<()> {
//! let schema = Schema::new(stubdb::Db::from_json(r#"{"addresses": [{"id": 1, "name": "foo"}]}"#)?);
//! schema.register_model("user", ModelDef::new())?;
//! schema.register_model("address", ModelDef::new().belongs_to("user"))?;
//!
//! let address = schema.model("address")?.find(1)?.unwrap();
//! let ganon = address.belongs_to("user")?.create(record! { "name" => "Ganon" })?;
//!
//! assert_eq!(address.attr("user_id"), stubdb::Value::from(ganon.id()));
//! # Ok(())
//! # }
//! ```

mod model;
pub use model::Model;

mod model_class;
pub use model_class::ModelClass;

pub mod relation;
pub use relation::{BelongsTo, HasMany};

pub mod schema;
pub use schema::{ModelDef, Schema, UnknownCollectionPolicy};

pub mod shorthand;

pub use stubdb_core::{
    bail, err, is_singular, pluralize, query, record, singularize, Collection, Db, Error, Id,
    Name, Query, Record, Result, Value,
};
