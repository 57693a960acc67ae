#[macro_use]
mod macros;

mod collection;
pub use collection::Collection;

mod db;
pub use db::Db;

mod error;
pub use error::{Error, IntoError};

mod name;
pub use name::{is_singular, pluralize, singularize, Name};

mod query;
pub use query::Query;

mod record;
pub use record::Record;

mod value;
pub use value::{Id, Value};

/// A Result type alias that uses stubdb's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
