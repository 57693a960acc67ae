use super::Error;

/// Error when the same model name is registered with a schema twice.
#[derive(Debug)]
pub(super) struct DuplicateRegistrationError {
    model: Box<str>,
}

impl std::error::Error for DuplicateRegistrationError {}

impl core::fmt::Display for DuplicateRegistrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model `{}` is already registered", self.model)
    }
}

impl Error {
    /// Creates a duplicate registration error.
    ///
    /// Registration happens once at setup time, so this is always fatal.
    pub fn duplicate_registration(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateRegistration(
            DuplicateRegistrationError {
                model: model.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a duplicate registration error.
    pub fn is_duplicate_registration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::DuplicateRegistration(_)))
    }
}
