//! The keyed listener registry.

use crate::delivery::{self, GateOutcome};
use hookbus_core::{DispatchError, KeySegments, Listener, ListenerKey, SharedListener, Topic};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

/// Identity of one chain: the topic type plus its listener key.
///
/// The topic's `TypeId` fixes the payload type, so two topics that happen to
/// share a name never share a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ChainId {
    topic: TypeId,
    key: ListenerKey,
}

impl ChainId {
    fn of<T: Topic>(segments: impl Into<KeySegments>) -> Self {
        Self {
            topic: TypeId::of::<T>(),
            key: ListenerKey::new(T::NAME, segments),
        }
    }
}

type Chain<P> = Vec<SharedListener<P>>;

/// A registry of listener chains keyed by topic and extra key segments.
///
/// Listeners registered under the same key form a chain that is always
/// visited in registration order. Registration needs `&mut self` and
/// dispatch `&self`; share a bus across tasks behind a single lock.
///
/// # Example
///
/// ```
/// use hookbus_std::EventBus;
///
/// hookbus_std::hookbus_core::topics! {
///     Logout = "logout" => ();
/// }
///
/// let mut bus = EventBus::new();
/// bus.on::<Logout>(|_: ()| println!("run processes after log out"), ());
/// bus.emit::<Logout>((), ()).unwrap();
/// ```
#[derive(Default)]
pub struct EventBus {
    chains: HashMap<ChainId, Box<dyn Any + Send + Sync>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the chain for `(T::NAME, segments)`.
    pub fn on<T: Topic>(
        &mut self,
        listener: impl Listener<T::Payload>,
        segments: impl Into<KeySegments>,
    ) {
        self.on_shared::<T>(Arc::new(listener), segments);
    }

    /// Append an already shared listener. The same `Arc` may be registered
    /// under several keys.
    pub fn on_shared<T: Topic>(
        &mut self,
        listener: SharedListener<T::Payload>,
        segments: impl Into<KeySegments>,
    ) {
        let id = ChainId::of::<T>(segments);
        let slot = self
            .chains
            .entry(id.clone())
            .or_insert_with(|| Box::new(Chain::<T::Payload>::new()));
        // Keyed by the topic's TypeId, so the stored chain always has this type.
        if let Some(chain) = slot.downcast_mut::<Chain<T::Payload>>() {
            chain.push(listener);
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(key = %id.key, listeners = chain.len(), "listener registered");
            }
        }
    }

    /// Remove the whole chain for `(T::NAME, segments)`.
    ///
    /// Returns how many listeners were removed; `0` if there was no chain.
    pub fn off<T: Topic>(&mut self, segments: impl Into<KeySegments>) -> usize {
        let id = ChainId::of::<T>(segments);
        let removed = self
            .chains
            .remove(&id)
            .and_then(|slot| slot.downcast::<Chain<T::Payload>>().ok())
            .map_or(0, |chain| chain.len());
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(key = %id.key, removed, "listeners unregistered");
        }
        removed
    }

    /// The chain for `(T::NAME, segments)`, or `None` if nothing was
    /// registered under that key.
    pub fn get<T: Topic>(
        &self,
        segments: impl Into<KeySegments>,
    ) -> Option<&[SharedListener<T::Payload>]> {
        self.chain::<T>(&ChainId::of::<T>(segments))
    }

    /// Number of listeners in the chain for `(T::NAME, segments)`.
    pub fn listener_count<T: Topic>(&self, segments: impl Into<KeySegments>) -> usize {
        self.get::<T>(segments).map_or(0, <[_]>::len)
    }

    /// Number of chains across all topics.
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Whether no chain is registered.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Drop every chain.
    pub fn clear(&mut self) {
        self.chains.clear();
    }

    /// Fire-and-forget dispatch.
    ///
    /// Invokes every listener of the chain once, in order, and returns without
    /// waiting for deferred verdicts. Returned values are ignored. A listener
    /// that fails synchronously stops the loop and its error is returned.
    pub fn emit<T: Topic>(
        &self,
        payload: T::Payload,
        segments: impl Into<KeySegments>,
    ) -> Result<(), DispatchError> {
        let id = ChainId::of::<T>(segments);
        match self.chain::<T>(&id) {
            Some(chain) => delivery::deliver_all(&id.key, chain, payload),
            None => Ok(()),
        }
    }

    /// Gated dispatch.
    ///
    /// Runs the chain sequentially and returns `true` if it is empty or every
    /// listener answered truthy. The first falsy answer, error or panic yields
    /// `false` and no later listener runs.
    pub async fn emit_with_check<T: Topic>(
        &self,
        payload: T::Payload,
        segments: impl Into<KeySegments>,
    ) -> bool {
        self.check::<T>(payload, segments).await.passed()
    }

    /// Gated dispatch that reports where and why the chain halted.
    pub async fn check<T: Topic>(
        &self,
        payload: T::Payload,
        segments: impl Into<KeySegments>,
    ) -> GateOutcome {
        let id = ChainId::of::<T>(segments);
        let Some(chain) = self.chain::<T>(&id) else {
            return GateOutcome::Passed;
        };
        let outcome = delivery::deliver_gated(chain, payload).await;
        #[cfg(feature = "tracing")]
        {
            match &outcome {
                GateOutcome::Passed => {}
                GateOutcome::Rejected { index } => {
                    tracing::debug!(key = %id.key, index, "chain rejected");
                }
                GateOutcome::Failed { index, error } => {
                    tracing::debug!(key = %id.key, index, %error, "chain listener failed");
                }
            }
        }
        outcome
    }

    fn chain<T: Topic>(&self, id: &ChainId) -> Option<&[SharedListener<T::Payload>]> {
        self.chains
            .get(id)
            .and_then(|slot| slot.downcast_ref::<Chain<T::Payload>>())
            .map(Vec::as_slice)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.chains.keys().map(|id| id.key.canonical()).collect();
        keys.sort();
        f.debug_struct("EventBus").field("chains", &keys).finish()
    }
}
