//! Message trait for payload types.

/// A marker trait for payloads carried by topics.
///
/// Payloads must be `Send + Sync + 'static` so that listeners and deferred
/// verdicts can move them across await points.
///
/// Every type meeting those bounds is a `Message`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Payloads in hookbus must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}
