//! Listener verdicts and the truthiness conversions feeding them.

use crate::error::BoxError;
use futures::future::BoxFuture;
use std::fmt;

/// What a listener produced when it was invoked.
///
/// `Ok(true)` continues a gated chain; `Ok(false)` halts it; `Err` is a
/// listener failure. Fire-and-forget dispatch ignores `Ok` values.
pub enum Verdict {
    /// The result is available immediately.
    Ready(Result<bool, BoxError>),
    /// The result is produced by a deferred computation.
    Deferred(BoxFuture<'static, Result<bool, BoxError>>),
}

impl Verdict {
    /// A ready verdict that continues the chain.
    pub const fn pass() -> Self {
        Verdict::Ready(Ok(true))
    }

    /// A ready verdict that halts the chain.
    pub const fn halt() -> Self {
        Verdict::Ready(Ok(false))
    }

    /// A ready failure.
    pub fn fail(error: impl Into<BoxError>) -> Self {
        Verdict::Ready(Err(error.into()))
    }

    /// Whether the result still has to be awaited.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Verdict::Deferred(_))
    }
}

impl fmt::Debug for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Verdict::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Conversion of a listener's return value into a boolean-like outcome.
///
/// # Default Implementations
///
/// - `bool` → itself
/// - `()` → `false` (no answer is not an approval)
/// - `Option<T>` → `None` is `false`, `Some` delegates to `T`
/// - `Result<T, E>` → delegates to `T` or becomes a failure
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a listener verdict",
    label = "missing `IntoVerdict` implementation",
    note = "Listeners must return `bool`, `()`, `Option<_>` or `Result<_, E>` with `E: Into<BoxError>`."
)]
pub trait IntoVerdict {
    /// Convert into the continue/halt decision or a failure.
    fn into_verdict(self) -> Result<bool, BoxError>;
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Result<bool, BoxError> {
        Ok(self)
    }
}

impl IntoVerdict for () {
    fn into_verdict(self) -> Result<bool, BoxError> {
        Ok(false)
    }
}

impl<T: IntoVerdict> IntoVerdict for Option<T> {
    fn into_verdict(self) -> Result<bool, BoxError> {
        match self {
            Some(t) => t.into_verdict(),
            None => Ok(false),
        }
    }
}

impl<T, E> IntoVerdict for Result<T, E>
where
    T: IntoVerdict,
    E: Into<BoxError>,
{
    fn into_verdict(self) -> Result<bool, BoxError> {
        match self {
            Ok(t) => t.into_verdict(),
            Err(e) => Err(e.into()),
        }
    }
}
