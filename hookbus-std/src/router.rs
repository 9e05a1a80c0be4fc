//! # Action Router
//!
//! Middleware and post-hook chains bracketing a guarded action.
//!
//! The router owns one [`EventBus`] and partitions it into two channels:
//! `"before"` for middleware, whose payload is the action's input `M`, and
//! `"after"` for post-hooks, whose payload is the action's result `P`. The
//! process name is the first key segment; extra segments scope further.
//!
//! The router never performs the action itself. Callers run the middleware,
//! perform the action only when it passed, then check the post-hooks with
//! the action's result:
//!
//! ```
//! use hookbus_std::EventRouter;
//!
//! # futures::executor::block_on(async {
//! let mut router = EventRouter::<String, Result<u64, String>>::new();
//! router.set_middleware("registerUser", |name: String| !name.is_empty(), ());
//! router.set_after("registerUser", |res: Result<u64, String>| res.is_ok(), ());
//!
//! let input = "ada".to_string();
//! if router.run_middlewares("registerUser", input, ()).await {
//!     let result = Ok(1);
//!     assert!(router.check_post_events("registerUser", result, ()).await);
//! }
//! # });
//! ```

use crate::{bus::EventBus, delivery::GateOutcome};
use hookbus_core::{KeySegments, Listener, Message, SharedListener, Topic};
use std::{fmt, marker::PhantomData};

/// The middleware channel, carrying the guarded action's input.
pub struct Before<M>(PhantomData<fn() -> M>);

impl<M: Message + Clone> Topic for Before<M> {
    const NAME: &'static str = "before";
    type Payload = M;
}

/// The post-hook channel, carrying the guarded action's result.
pub struct After<P>(PhantomData<fn() -> P>);

impl<P: Message + Clone> Topic for After<P> {
    const NAME: &'static str = "after";
    type Payload = P;
}

/// Process-scoped middleware and post-hook chains over one [`EventBus`].
pub struct EventRouter<M, P> {
    bus: EventBus,
    _marker: PhantomData<fn(M, P)>,
}

impl<M, P> EventRouter<M, P>
where
    M: Message + Clone,
    P: Message + Clone,
{
    /// Create a router with no middleware and no post-hooks.
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
            _marker: PhantomData,
        }
    }

    /// Register a middleware predicate for `process`.
    pub fn set_middleware(
        &mut self,
        process: &str,
        predicate: impl Listener<M>,
        extra: impl Into<KeySegments>,
    ) {
        self.bus
            .on::<Before<M>>(predicate, KeySegments::prefixed(process, extra));
    }

    /// Register a post-hook predicate for `process`.
    pub fn set_after(
        &mut self,
        process: &str,
        predicate: impl Listener<P>,
        extra: impl Into<KeySegments>,
    ) {
        self.bus
            .on::<After<P>>(predicate, KeySegments::prefixed(process, extra));
    }

    /// The middleware chain for `process`; empty if none is registered.
    pub fn middlewares(&self, process: &str, extra: impl Into<KeySegments>) -> &[SharedListener<M>] {
        self.bus
            .get::<Before<M>>(KeySegments::prefixed(process, extra))
            .unwrap_or_default()
    }

    /// The post-hook chain for `process`; empty if none is registered.
    pub fn post_events(&self, process: &str, extra: impl Into<KeySegments>) -> &[SharedListener<P>] {
        self.bus
            .get::<After<P>>(KeySegments::prefixed(process, extra))
            .unwrap_or_default()
    }

    /// Run the middleware chain with the action's input.
    ///
    /// Returns `true` iff the caller should perform the guarded action.
    pub async fn run_middlewares(
        &self,
        process: &str,
        payload: M,
        extra: impl Into<KeySegments>,
    ) -> bool {
        self.inspect_middlewares(process, payload, extra)
            .await
            .passed()
    }

    /// Run the post-hook chain with the action's result.
    ///
    /// Returns `true` iff every post-hook accepted the result.
    pub async fn check_post_events(
        &self,
        process: &str,
        payload: P,
        extra: impl Into<KeySegments>,
    ) -> bool {
        self.inspect_post_events(process, payload, extra)
            .await
            .passed()
    }

    /// Like [`run_middlewares`](Self::run_middlewares), reporting where the
    /// chain halted.
    pub async fn inspect_middlewares(
        &self,
        process: &str,
        payload: M,
        extra: impl Into<KeySegments>,
    ) -> GateOutcome {
        let segments = KeySegments::prefixed(process, extra);
        self.bus.check::<Before<M>>(payload, segments).await
    }

    /// Like [`check_post_events`](Self::check_post_events), reporting where
    /// the chain halted.
    pub async fn inspect_post_events(
        &self,
        process: &str,
        payload: P,
        extra: impl Into<KeySegments>,
    ) -> GateOutcome {
        let segments = KeySegments::prefixed(process, extra);
        self.bus.check::<After<P>>(payload, segments).await
    }

    /// Drop the middleware chain for `process`. Returns how many were removed.
    pub fn remove_middlewares(&mut self, process: &str, extra: impl Into<KeySegments>) -> usize {
        self.bus
            .off::<Before<M>>(KeySegments::prefixed(process, extra))
    }

    /// Drop the post-hook chain for `process`. Returns how many were removed.
    pub fn remove_post_events(&mut self, process: &str, extra: impl Into<KeySegments>) -> usize {
        self.bus
            .off::<After<P>>(KeySegments::prefixed(process, extra))
    }
}

impl<M, P> Default for EventRouter<M, P>
where
    M: Message + Clone,
    P: Message + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M, P> fmt::Debug for EventRouter<M, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter").field("bus", &self.bus).finish()
    }
}
