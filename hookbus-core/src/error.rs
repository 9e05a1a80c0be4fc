//! Error types for hookbus.
//!
//! - [`DispatchError`] - Errors returned by fire-and-forget dispatch
//! - [`ListenerError`] - The cause of a failed listener during gated dispatch

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during fire-and-forget dispatch.
///
/// Gated dispatch never produces this type; it collapses failures into
/// `false`.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A listener failed synchronously. Listeners after it were not invoked.
    #[error("listener #{index} for {key} failed")]
    Listener {
        /// Canonical form of the key being dispatched.
        key: String,
        /// Position of the failing listener in its chain.
        index: usize,
        /// The error the listener returned.
        #[source]
        source: BoxError,
    },
}

/// Why a listener failed during gated dispatch.
#[derive(Error, Debug)]
pub enum ListenerError {
    /// The listener panicked.
    #[error("listener panicked: {0}")]
    Panic(String),

    /// The listener's deferred verdict did not settle in time.
    #[error("listener timed out after {0:?}")]
    Timeout(Duration),

    /// The listener returned an error.
    #[error(transparent)]
    Custom(BoxError),
}

impl ListenerError {
    /// Builds a [`ListenerError::Panic`] from a caught panic payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        ListenerError::Panic(message)
    }
}

impl From<BoxError> for ListenerError {
    fn from(err: BoxError) -> Self {
        match err.downcast::<ListenerError>() {
            Ok(inner) => *inner,
            Err(err) => ListenerError::Custom(err),
        }
    }
}
