use super::Error;

/// Error when a lookup or mutation references a collection that was never
/// created or seeded.
#[derive(Debug)]
pub(super) struct UnknownCollectionError {
    collection: Box<str>,
}

impl std::error::Error for UnknownCollectionError {}

impl core::fmt::Display for UnknownCollectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown collection `{}`", self.collection)
    }
}

impl Error {
    /// Creates an unknown collection error.
    pub fn unknown_collection(collection: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownCollection(UnknownCollectionError {
            collection: collection.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown collection error.
    pub fn is_unknown_collection(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownCollection(_)))
    }
}
