//! Standard listener wrappers.

pub mod when;

#[cfg(feature = "timeout")]
pub mod timeout;

#[cfg(feature = "timeout")]
pub use timeout::TimeoutListener;
pub use when::When;

use hookbus_core::{Listener, Message};

/// Combinators available on every listener.
pub trait ListenerExt<P: Message>: Listener<P> + Sized {
    /// Only invoke this listener when `predicate` holds for the payload.
    /// Payloads it skips count as a pass.
    fn when<F>(self, predicate: F) -> When<Self, F>
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        When::new(self, predicate)
    }

    /// Fail deferred verdicts that do not settle within `duration`.
    #[cfg(feature = "timeout")]
    fn with_timeout(self, duration: std::time::Duration) -> TimeoutListener<Self> {
        TimeoutListener::new(self, duration)
    }
}

impl<P: Message, L: Listener<P>> ListenerExt<P> for L {}
