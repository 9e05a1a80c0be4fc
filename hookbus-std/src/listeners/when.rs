//! Conditional listener.

use hookbus_core::{Listener, Message, Verdict};

/// A listener that only runs its inner listener for matching payloads.
pub struct When<L, F> {
    listener: L,
    predicate: F,
}

impl<L, F> When<L, F> {
    /// Create a new conditional listener.
    pub fn new(listener: L, predicate: F) -> Self {
        Self {
            listener,
            predicate,
        }
    }
}

impl<P, L, F> Listener<P> for When<L, F>
where
    P: Message,
    L: Listener<P>,
    F: Fn(&P) -> bool + Send + Sync + 'static,
{
    fn invoke(&self, payload: P) -> Verdict {
        if (self.predicate)(&payload) {
            self.listener.invoke(payload)
        } else {
            Verdict::pass()
        }
    }
}
