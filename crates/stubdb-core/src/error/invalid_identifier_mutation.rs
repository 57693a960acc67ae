use super::Error;
use crate::Id;

/// Error when the `id` of a saved model is reassigned.
#[derive(Debug)]
pub(super) struct InvalidIdentifierMutationError {
    model: Box<str>,
    id: Id,
}

impl std::error::Error for InvalidIdentifierMutationError {}

impl core::fmt::Display for InvalidIdentifierMutationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot change the id of saved model `{}` (id={})",
            self.model, self.id
        )
    }
}

impl Error {
    /// Creates an invalid identifier mutation error.
    pub fn invalid_identifier_mutation(model: impl Into<String>, id: Id) -> Error {
        Error::from(super::ErrorKind::InvalidIdentifierMutation(
            InvalidIdentifierMutationError {
                model: model.into().into(),
                id,
            },
        ))
    }

    /// Returns `true` if this error is an invalid identifier mutation error.
    pub fn is_invalid_identifier_mutation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidIdentifierMutation(_)))
    }
}
