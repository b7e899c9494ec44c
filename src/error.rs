use crate::options::Errors;
use thiserror::Error;

/// Top-level error type returned by [`apply`](crate::apply).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("receiver `{receiver}` is nil")]
    NilReceiver { receiver: &'static str },

    #[error(transparent)]
    Options(#[from] Errors),
}

impl Error {
    /// Returns the errors collected from the options, if any ran and failed.
    pub fn errors(&self) -> Option<&Errors> {
        match self {
            Self::Options(errors) => Some(errors),
            Self::NilReceiver { .. } => None,
        }
    }

    /// Returns `true` if an option stopped the sequence with a
    /// [`FailFast`](crate::FailFast).
    pub fn is_fail_fast(&self) -> bool {
        self.errors().is_some_and(Errors::is_fail_fast)
    }

    /// See [`Errors::find`].
    pub fn find<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.errors().and_then(Errors::find::<E>)
    }

    /// See [`Errors::contains`].
    pub fn contains<E: std::error::Error + PartialEq + 'static>(&self, target: &E) -> bool {
        self.errors().is_some_and(|errors| errors.contains(target))
    }
}

/// Result alias for constructors that delegate to [`apply`](crate::apply).
pub type Result<T, E = Error> = std::result::Result<T, E>;
