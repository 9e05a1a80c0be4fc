//! # hookbus - Typed In-Process Listener Registry
//!
//! `hookbus` decouples a named action from the listeners that run before and
//! after it. Listeners are registered under a typed [`Topic`] plus optional
//! key segments, and are always visited in registration order.
//!
//! ## Event bus
//!
//! ```rust
//! use hookbus::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! struct User {
//!     first_name: String,
//! }
//!
//! hookbus::topics! {
//!     UserUpdated = "userUpdated" => User;
//! }
//!
//! let mut bus = EventBus::new();
//! bus.on::<UserUpdated>(|user: User| println!("{}", user.first_name), ());
//! bus.on::<UserUpdated>(|_: User| println!("tenant A only"), "tenantA");
//!
//! // Only the unscoped listener runs.
//! bus.emit::<UserUpdated>(User { first_name: "Ada".into() }, ())?;
//! # Ok::<(), hookbus::DispatchError>(())
//! ```
//!
//! ## Router
//!
//! ```rust
//! use hookbus::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let mut router = EventRouter::<String, Result<String, String>>::new();
//! router.set_middleware("registerUser", |name: String| name.len() > 2, ());
//! router.set_after("registerUser", |res: Result<String, String>| res.is_ok(), ());
//!
//! assert!(!router.run_middlewares("registerUser", "al".into(), ()).await);
//! assert!(router.run_middlewares("registerUser", "ada".into(), ()).await);
//! assert!(!router.check_post_events("registerUser", Err("duplicate".into()), ()).await);
//! # });
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use hookbus_core::{
    // Error types
    BoxError,
    // Listener
    Deferred,
    DispatchError,
    IntoVerdict,
    // Keys
    KeySegments,
    Listener,
    ListenerError,
    ListenerKey,
    // Message
    Message,
    Segment,
    SharedListener,
    // Topic
    Topic,
    Verdict,
    deferred,
    topics,
};

pub use hookbus_std::{
    EventBus, EventRouter, GateOutcome, ListenerExt,
    router::{After, Before},
};

/// Delivery strategies for resolved chains.
pub mod delivery {
    pub use hookbus_std::delivery::{GateOutcome, deliver_all, deliver_gated};
}

/// Standard listener wrappers.
pub mod listeners {
    #![allow(clippy::wildcard_imports)]
    pub use hookbus_std::listeners::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use hookbus_std::testing::*;
}

/// Prelude module - common imports for hookbus.
///
/// # Usage
///
/// ```rust,ignore
/// use hookbus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, EventBus, EventRouter, GateOutcome, IntoVerdict, KeySegments, Listener,
        ListenerExt, Message, Topic, Verdict, deferred,
    };
}
