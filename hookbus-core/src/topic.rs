//! Typed topics.

use crate::message::Message;

/// A named event with a fixed payload type.
///
/// Topics are usually zero-sized marker types declared with [`topics!`].
/// The name becomes the first component of every [`ListenerKey`] the topic
/// is registered under.
///
/// [`ListenerKey`]: crate::ListenerKey
/// [`topics!`]: crate::topics
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Topic`",
    label = "missing `Topic` implementation",
    note = "Declare topics with `hookbus::topics!` or implement `Topic` by hand."
)]
pub trait Topic: Send + Sync + 'static {
    /// The event name.
    const NAME: &'static str;

    /// The value handed to every listener of this topic.
    type Payload: Message + Clone;
}

/// Declares one or more marker types implementing [`Topic`].
///
/// # Example
///
/// ```
/// #[derive(Clone)]
/// pub struct User {
///     pub first_name: String,
/// }
///
/// hookbus_core::topics! {
///     /// A user's profile changed.
///     pub UserUpdated = "userUpdated" => User;
///     pub Logout = "logout" => ();
/// }
///
/// use hookbus_core::Topic;
/// assert_eq!(UserUpdated::NAME, "userUpdated");
/// assert_eq!(Logout::NAME, "logout");
/// ```
#[macro_export]
macro_rules! topics {
    ($($(#[$meta:meta])* $vis:vis $topic:ident = $name:literal => $payload:ty;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            $vis struct $topic;

            impl $crate::Topic for $topic {
                const NAME: &'static str = $name;
                type Payload = $payload;
            }
        )+
    };
}
