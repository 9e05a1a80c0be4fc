//! # Listeners
//!
//! A listener is a callback registered on a topic. It receives an owned copy
//! of the dispatched payload and answers with a [`Verdict`].
//!
//! # Usage Patterns
//!
//! 1. **Sync closure**: `|user: User| user.name.len() > 2`
//! 2. **Async closure**: `deferred(|user: User| async move { lookup(&user).await.is_ok() })`
//! 3. **Struct implementation**: `impl Listener<User> for MyValidator`

use crate::{
    message::Message,
    verdict::{IntoVerdict, Verdict},
};
use futures::FutureExt;
use std::{future::Future, sync::Arc};

/// A callback invoked for every payload dispatched to its chain.
///
/// The trait is object-safe; registries store listeners as
/// [`SharedListener`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener` for `{P}`",
    label = "missing `Listener` implementation",
    note = "Closures `Fn({P}) -> R` with `R: IntoVerdict` are listeners; wrap async closures with `hookbus::deferred`."
)]
pub trait Listener<P: Message>: Send + Sync + 'static {
    /// Invoke the listener.
    fn invoke(&self, payload: P) -> Verdict;
}

/// A reference-counted, type-erased listener as stored in a chain.
pub type SharedListener<P> = Arc<dyn Listener<P>>;

// Blanket impl for sync closures
impl<F, P, R> Listener<P> for F
where
    P: Message,
    R: IntoVerdict,
    F: Fn(P) -> R + Send + Sync + 'static,
{
    fn invoke(&self, payload: P) -> Verdict {
        Verdict::Ready((self)(payload).into_verdict())
    }
}

/// A listener whose verdict is computed asynchronously.
///
/// Created with [`deferred`].
#[derive(Clone)]
pub struct Deferred<F> {
    f: F,
}

/// Wrap an async closure so it can be registered as a listener.
///
/// ```
/// use hookbus_core::{Listener, Verdict, deferred};
///
/// let listener = deferred(|name: String| async move { !name.is_empty() });
/// assert!(matches!(listener.invoke("ada".to_string()), Verdict::Deferred(_)));
/// ```
pub fn deferred<F>(f: F) -> Deferred<F> {
    Deferred { f }
}

impl<F, P, Fut> Listener<P> for Deferred<F>
where
    P: Message,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoVerdict,
{
    fn invoke(&self, payload: P) -> Verdict {
        Verdict::Deferred((self.f)(payload).map(IntoVerdict::into_verdict).boxed())
    }
}
