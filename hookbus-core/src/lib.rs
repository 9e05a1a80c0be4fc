//! # hookbus-core
//!
//! Core traits and types for the hookbus keyed listener registry.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only declares topics or implements listeners, without pulling in the
//! registry and router from `hookbus-std`.
//!
//! # Building Blocks
//!
//! ## Topics ([`Topic`])
//!
//! A topic is a type that names an event and fixes the payload every listener
//! of that event receives. The payload type is checked at the call boundary,
//! so a listener for one topic can never be handed another topic's payload.
//!
//! ## Keys ([`ListenerKey`], [`KeySegments`])
//!
//! Listeners are stored under a key made of the topic name followed by zero
//! or more extra segments. Segments scope a chain further, e.g. per tenant or
//! per form instance.
//!
//! ## Listeners ([`Listener`], [`Verdict`])
//!
//! A listener receives an owned payload and answers with a [`Verdict`]: a
//! ready boolean-like value or a deferred computation resolving to one.
//! Plain closures are listeners; async closures become listeners through
//! [`deferred`].
//!
//! # Error Types
//!
//! - [`DispatchError`] - Failures surfaced by fire-and-forget dispatch
//! - [`ListenerError`] - The cause behind a failed gated listener

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod key;
mod listener;
mod message;
mod topic;
mod verdict;

// Re-exports
pub use error::{BoxError, DispatchError, ListenerError};
pub use key::{KeySegments, ListenerKey, Segment};
pub use listener::{Deferred, Listener, SharedListener, deferred};
pub use message::Message;
pub use topic::Topic;
pub use verdict::{IntoVerdict, Verdict};
