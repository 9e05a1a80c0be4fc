//! # hookbus-std
//!
//! Standard implementations for the hookbus keyed listener registry.
//!
//! This crate provides:
//! - **Registry**: [`EventBus`], listener chains keyed by topic and segments
//! - **Delivery**: fire-and-forget and gated strategies, [`GateOutcome`]
//! - **Router**: [`EventRouter`], middleware and post-hooks around an action
//! - **Standard listeners**: `When`, `TimeoutListener`
//! - **Testing**: recording and failing listeners

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use hookbus_core;

// Modules
pub mod bus;
pub mod delivery;
pub mod listeners;
pub mod router;
pub mod testing;

pub use bus::EventBus;
pub use delivery::GateOutcome;
pub use listeners::ListenerExt;
pub use router::{After, Before, EventRouter};
