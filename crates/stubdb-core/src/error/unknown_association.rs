use super::Error;

/// Error when an accessor names an association the model never declared.
#[derive(Debug)]
pub(super) struct UnknownAssociationError {
    model: Box<str>,
    association: Box<str>,
}

impl std::error::Error for UnknownAssociationError {}

impl core::fmt::Display for UnknownAssociationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "model `{}` has no association named `{}`",
            self.model, self.association
        )
    }
}

impl Error {
    /// Creates an unknown association error.
    pub fn unknown_association(model: impl Into<String>, association: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownAssociation(UnknownAssociationError {
            model: model.into().into(),
            association: association.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown association error.
    pub fn is_unknown_association(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownAssociation(_)))
    }
}
