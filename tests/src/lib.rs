#[macro_use]
mod macros;

mod logging;
pub use logging::init_logging;


use stubdb::{Db, Schema};

pub use std_util::*;

/// Builds a store from a JSON fixture, panicking on malformed input.
pub fn fixtures(json: &str) -> Db {
    match Db::from_json(json) {
        Ok(db) => db,
        Err(err) => panic!("invalid fixtures: {err}"),
    }
}

/// A schema over an empty store with `user has_many addresses` and
/// `address belongs_to user`, the pair most scenarios start from.
pub fn users_and_addresses(db: Db) -> Schema {
    models!(db,
        "user" => stubdb::ModelDef::new().has_many("addresses"),
        "address" => stubdb::ModelDef::new().belongs_to("user"),
    )
}
