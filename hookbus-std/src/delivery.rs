//! Delivery strategies for a resolved chain of listeners.
//!
//! Both strategies visit listeners strictly in chain order and never run two
//! listeners of the same chain concurrently.
//!
//! - [`deliver_all`]: fire-and-forget. Invokes every listener, ignores
//!   results, does not wait for deferred verdicts beyond a first poll.
//! - [`deliver_gated`]: sequential fold with early exit. Awaits each verdict
//!   before the next listener is invoked.

use futures::{
    FutureExt,
    future::BoxFuture,
    task::{Context, noop_waker_ref},
};
use hookbus_core::{
    BoxError, DispatchError, Listener, ListenerError, ListenerKey, Message, SharedListener,
    Verdict,
};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// The result of a gated delivery.
#[derive(Debug)]
pub enum GateOutcome {
    /// Every listener answered truthy, or the chain was empty.
    Passed,
    /// The listener at `index` answered falsy.
    Rejected {
        /// Position of the rejecting listener.
        index: usize,
    },
    /// The listener at `index` failed or panicked.
    Failed {
        /// Position of the failing listener.
        index: usize,
        /// What went wrong.
        error: ListenerError,
    },
}

impl GateOutcome {
    /// Whether the guarded action may proceed.
    pub fn passed(&self) -> bool {
        matches!(self, GateOutcome::Passed)
    }

    /// Position of the listener that halted the chain, if any.
    pub fn halted_at(&self) -> Option<usize> {
        match self {
            GateOutcome::Passed => None,
            GateOutcome::Rejected { index } | GateOutcome::Failed { index, .. } => Some(*index),
        }
    }

    /// The failure cause, if a listener failed.
    pub fn error(&self) -> Option<&ListenerError> {
        match self {
            GateOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<GateOutcome> for bool {
    fn from(outcome: GateOutcome) -> Self {
        outcome.passed()
    }
}

/// Invoke every listener of `chain` once, in order.
///
/// `Ready(Ok(_))` values are ignored. The first `Ready(Err(_))` stops the
/// loop and is returned. A deferred verdict is polled once in place, so the
/// work before its first suspension point runs before the next listener.
/// Whatever is still pending after that is detached and never observed.
pub fn deliver_all<P>(
    key: &ListenerKey,
    chain: &[SharedListener<P>],
    payload: P,
) -> Result<(), DispatchError>
where
    P: Message + Clone,
{
    for (index, listener) in chain.iter().enumerate() {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(%key, index, "invoking listener");
        }
        match listener.invoke(payload.clone()) {
            Verdict::Ready(Ok(_)) => {}
            Verdict::Ready(Err(source)) => {
                return Err(DispatchError::Listener {
                    key: key.canonical(),
                    index,
                    source,
                });
            }
            Verdict::Deferred(mut pending) => {
                let mut cx = Context::from_waker(noop_waker_ref());
                if pending.poll_unpin(&mut cx).is_pending() {
                    detach(key, index, pending);
                }
            }
        }
    }
    Ok(())
}

/// Invoke the listeners of `chain` one by one, awaiting each verdict.
///
/// Stops at the first falsy verdict, error or panic. Listeners after that
/// point are never invoked.
pub async fn deliver_gated<P>(chain: &[SharedListener<P>], payload: P) -> GateOutcome
where
    P: Message + Clone,
{
    for (index, listener) in chain.iter().enumerate() {
        match settle(listener.as_ref(), payload.clone()).await {
            Ok(true) => continue,
            Ok(false) => return GateOutcome::Rejected { index },
            Err(error) => return GateOutcome::Failed { index, error },
        }
    }
    GateOutcome::Passed
}

async fn settle<P: Message>(listener: &dyn Listener<P>, payload: P) -> Result<bool, ListenerError> {
    let verdict = catch_unwind(AssertUnwindSafe(|| listener.invoke(payload)))
        .map_err(ListenerError::from_panic)?;
    match verdict {
        Verdict::Ready(result) => result.map_err(ListenerError::from),
        Verdict::Deferred(pending) => AssertUnwindSafe(pending)
            .catch_unwind()
            .await
            .map_err(ListenerError::from_panic)?
            .map_err(ListenerError::from),
    }
}

type Pending = BoxFuture<'static, Result<bool, BoxError>>;

/// Spawns the remainder onto the current tokio runtime, or drops it when
/// there is none.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn detach(key: &ListenerKey, index: usize, pending: Pending) {
    #[cfg(feature = "spawn")]
    let pending = match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            // The JoinHandle is dropped: the outcome is never observed.
            drop(handle.spawn(pending));
            return;
        }
        Err(_) => pending,
    };
    #[cfg(feature = "tracing")]
    {
        let reason = if cfg!(feature = "spawn") {
            "no async runtime available"
        } else {
            "spawn feature disabled"
        };
        tracing::warn!(%key, index, reason, "dropping pending deferred listener");
    }
    drop(pending);
}
