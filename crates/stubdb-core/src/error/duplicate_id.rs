use super::Error;
use crate::Id;

/// Error when a record is inserted with an id its collection already holds.
#[derive(Debug)]
pub(super) struct DuplicateIdError {
    collection: Box<str>,
    id: Id,
}

impl std::error::Error for DuplicateIdError {}

impl core::fmt::Display for DuplicateIdError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "collection `{}` already contains a record with id {}",
            self.collection, self.id
        )
    }
}

impl Error {
    /// Creates a duplicate id error.
    ///
    /// Ids are unique within a collection. Seeding or inserting a record whose
    /// explicit id is already taken fails with this error.
    pub fn duplicate_id(collection: impl Into<String>, id: Id) -> Error {
        Error::from(super::ErrorKind::DuplicateId(DuplicateIdError {
            collection: collection.into().into(),
            id,
        }))
    }

    /// Returns `true` if this error is a duplicate id error.
    pub fn is_duplicate_id(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::DuplicateId(_)))
    }
}
