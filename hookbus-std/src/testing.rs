//! Testing utilities for hookbus.
//!
//! This module provides listeners that make it easy to assert what a chain
//! did.
//!
//! # Features
//!
//! - [`RecordingListener`]: Records every payload and answers a fixed verdict
//! - [`CallLog`]: A shared log that hands out tagged listeners, for asserting
//!   invocation order across a chain
//! - [`FailingListener`]: A listener that errors or panics on purpose

use hookbus_core::{BoxError, Listener, Message, Verdict, deferred};
use std::{
    future::Future,
    sync::{Arc, Mutex},
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all payloads it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::<User>::new();
/// bus.on::<UserUpdated>(recorder.clone(), ());
///
/// bus.emit::<UserUpdated>(user, ())?;
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingListener<P> {
    payloads: Arc<Mutex<Vec<P>>>,
    verdict: bool,
}

impl<P> RecordingListener<P> {
    /// Create a new recording listener that answers `true`.
    pub fn new() -> Self {
        Self::with_verdict(true)
    }

    /// Create a recording listener that answers the given verdict.
    pub fn with_verdict(verdict: bool) -> Self {
        Self {
            payloads: Arc::new(Mutex::new(Vec::new())),
            verdict,
        }
    }

    /// Get the number of recorded payloads.
    pub fn count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    /// Clear all recorded payloads.
    pub fn clear(&self) {
        self.payloads.lock().unwrap().clear();
    }
}

impl<P: Clone> RecordingListener<P> {
    /// Get a clone of the recorded payloads.
    pub fn payloads(&self) -> Vec<P> {
        self.payloads.lock().unwrap().clone()
    }
}

impl<P> Default for RecordingListener<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for RecordingListener<P> {
    fn clone(&self) -> Self {
        Self {
            payloads: self.payloads.clone(),
            verdict: self.verdict,
        }
    }
}

impl<P: Message> Listener<P> for RecordingListener<P> {
    fn invoke(&self, payload: P) -> Verdict {
        self.payloads.lock().unwrap().push(payload);
        Verdict::Ready(Ok(self.verdict))
    }
}

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered log of listener invocations.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// bus.on::<Logout>(log.listener("first", true), ());
/// bus.on::<Logout>(log.listener("second", true), ());
///
/// bus.emit::<Logout>((), ())?;
/// assert_eq!(log.entries(), vec!["first", "second"]);
/// ```
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// Get a copy of the entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// A sync listener that records `tag` and answers `verdict`.
    pub fn listener<P: Message>(&self, tag: &str, verdict: bool) -> impl Listener<P> + use<P> {
        let log = self.clone();
        let tag = tag.to_string();
        move |_payload: P| {
            log.record(tag.clone());
            verdict
        }
    }

    /// A deferred listener that records `tag` once its work completes.
    ///
    /// `work` runs before the entry is recorded, so a slow listener records
    /// after a fast one only if they actually ran concurrently.
    pub fn deferred_listener<P, W, Fut>(
        &self,
        tag: &str,
        verdict: bool,
        work: W,
    ) -> impl Listener<P> + use<P, W, Fut>
    where
        P: Message,
        W: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let log = self.clone();
        let tag = tag.to_string();
        deferred(move |_payload: P| {
            let log = log.clone();
            let tag = tag.clone();
            let work = work();
            async move {
                work.await;
                log.record(tag);
                verdict
            }
        })
    }
}

// ============================================================================
// Failing Listener
// ============================================================================

/// How a [`FailingListener`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Return an error from a ready verdict.
    Error,
    /// Return an error from a deferred verdict.
    DeferredError,
    /// Panic while being invoked.
    Panic,
}

/// A listener that always fails.
#[derive(Debug, Clone)]
pub struct FailingListener {
    message: String,
    mode: FailureMode,
}

impl FailingListener {
    /// Fail with a ready error carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mode: FailureMode::Error,
        }
    }

    /// Fail with a deferred error carrying `message`.
    pub fn deferred_error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mode: FailureMode::DeferredError,
        }
    }

    /// Panic with `message` when invoked.
    pub fn panicking(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mode: FailureMode::Panic,
        }
    }

    /// The configured failure mode.
    pub fn mode(&self) -> FailureMode {
        self.mode
    }
}

impl<P: Message> Listener<P> for FailingListener {
    fn invoke(&self, _payload: P) -> Verdict {
        match self.mode {
            FailureMode::Error => Verdict::fail(self.message.clone()),
            FailureMode::DeferredError => {
                let message = self.message.clone();
                Verdict::Deferred(Box::pin(async move { Err::<bool, BoxError>(message.into()) }))
            }
            FailureMode::Panic => panic!("{}", self.message),
        }
    }
}
