//! Typed accessors for a model's associations.
//!
//! An accessor borrows nothing: it holds a clone of the owning [`Model`]
//! handle and the index of the association, so it can be kept around and
//! reused.
//!
//! [`Model`]: crate::Model

mod belongs_to;
pub use belongs_to::BelongsTo;

mod has_many;
pub use has_many::HasMany;
