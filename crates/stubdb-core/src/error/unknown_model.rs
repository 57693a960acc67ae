use super::Error;

/// Error when a model name was never registered with the schema.
///
/// This occurs when:
/// - `Schema::model` is called with an unregistered name
/// - An association targets a model that was never registered
#[derive(Debug)]
pub(super) struct UnknownModelError {
    model: Box<str>,
}

impl std::error::Error for UnknownModelError {}

impl core::fmt::Display for UnknownModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown model `{}`", self.model)
    }
}

impl Error {
    /// Creates an unknown model error.
    pub fn unknown_model(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownModel(UnknownModelError {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown model error.
    pub fn is_unknown_model(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownModel(_)))
    }
}
