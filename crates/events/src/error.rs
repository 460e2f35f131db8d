//! Dispatcher error model.

use thiserror::Error;

use crate::HandlerError;

/// Result type used by every dispatcher operation.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatcher-level error.
///
/// Nothing here is fatal to the dispatcher: after any of these the same
/// instance keeps working, and no operation retries internally.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A required argument was absent (names the argument).
    #[error("invalid argument: `{0}` must be present")]
    InvalidArgument(&'static str),

    /// A handler failed during `invoke`; the rest of that broadcast was skipped.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// A registry entry held handlers of a different event type than its key.
    #[error("registry entry for `{0}` holds handlers of another event type")]
    TypeMismatch(&'static str),

    /// The registry lock was poisoned.
    #[error("subscriber registry lock poisoned")]
    Poisoned,
}

impl DispatchError {
    pub fn invalid_argument(name: &'static str) -> Self {
        Self::InvalidArgument(name)
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// The handler's own error, if this came from a handler.
    pub fn handler_error(&self) -> Option<&HandlerError> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }

    pub fn into_handler_error(self) -> Option<HandlerError> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }
}
