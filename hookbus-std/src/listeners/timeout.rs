//! Timeout listener for time-limited deferred verdicts.
//!
//! **Note**: This module requires the `tokio` runtime (feature `timeout`).
//! Gated dispatch itself never times out; wrap individual listeners whose
//! deferred work may hang.

use futures::FutureExt;
use hookbus_core::{BoxError, Listener, ListenerError, Message, Verdict};
use std::time::Duration;

/// A listener that bounds how long its deferred verdict may take.
///
/// Ready verdicts pass through untouched. A deferred verdict that does not
/// settle in time resolves to [`ListenerError::Timeout`], which halts a
/// gated chain like any other failure.
///
/// # Example
///
/// ```rust,ignore
/// use hookbus::listeners::TimeoutListener;
/// use std::time::Duration;
///
/// let bounded = TimeoutListener::new(deferred(check_user_name), Duration::from_secs(5));
/// router.set_middleware("registerUser", bounded, ());
/// ```
pub struct TimeoutListener<L> {
    inner: L,
    duration: Duration,
}

impl<L> TimeoutListener<L> {
    /// Create a new `TimeoutListener` wrapping the given listener.
    pub fn new(inner: L, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// Create a `TimeoutListener` with the timeout specified in seconds.
    pub fn secs(inner: L, seconds: u64) -> Self {
        Self::new(inner, Duration::from_secs(seconds))
    }

    /// Create a `TimeoutListener` with the timeout specified in milliseconds.
    pub fn millis(inner: L, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Get the configured timeout duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Get a reference to the inner listener.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<P, L> Listener<P> for TimeoutListener<L>
where
    P: Message,
    L: Listener<P>,
{
    fn invoke(&self, payload: P) -> Verdict {
        match self.inner.invoke(payload) {
            Verdict::Deferred(pending) => {
                let duration = self.duration;
                Verdict::Deferred(
                    async move {
                        match tokio::time::timeout(duration, pending).await {
                            Ok(result) => result,
                            Err(_) => Err(Box::new(ListenerError::Timeout(duration)) as BoxError),
                        }
                    }
                    .boxed(),
                )
            }
            ready => ready,
        }
    }
}
