//! The built-in unexpected-failure signal.

/// Boxed dynamic error, the most permissive failure type a boundary can
/// classify.
///
/// Any concrete error can cross a `BoxError` boundary, and
/// [`Kind::of`](crate::Kind::of) recovers the concrete kind by downcast.
/// This is the natural failure type for boundaries that sit in front of
/// code mixing many error sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Signal for a failure that was not declared expected at a boundary.
///
/// This is the default conversion outcome: a distinguishable kind carrying
/// a fixed human-readable message and no reference to the original failure.
/// Callers that need the original detail install a custom conversion hook
/// instead.
///
/// `UnexpectedError` is an ordinary error type; downstream code can
/// construct it, match on it, or declare it expected at an outer boundary
/// like any other kind.
///
/// # Example
///
/// ```
/// use errorbound_core::UnexpectedError;
///
/// let err = UnexpectedError::default();
/// assert_eq!(err.to_string(), "Unexpected error");
///
/// let err = UnexpectedError::new("ledger import failed");
/// assert_eq!(err.message(), "ledger import failed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UnexpectedError {
    message: String,
}

impl UnexpectedError {
    /// The fixed message carried by default conversions.
    pub const MESSAGE: &'static str = "Unexpected error";

    /// Creates a signal with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the signal's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The default conversion hook: discards the captured failure and
    /// fails with the fixed [`MESSAGE`](Self::MESSAGE).
    ///
    /// Exposed so a customized boundary can be switched back to the
    /// default behavior:
    ///
    /// ```
    /// use errorbound_core::{Boundary, BoxError, UnexpectedError};
    ///
    /// let boundary: Boundary<u32, BoxError> = Boundary::expecting([])
    ///     .on_unexpected(|_| Ok(0))
    ///     .on_unexpected(UnexpectedError::deny);
    ///
    /// let failure = boundary.scope(|| Err("anything".into())).unwrap_err();
    /// assert_eq!(failure.to_string(), "Unexpected error");
    /// ```
    pub fn deny<T, E>(failure: E) -> Result<T, E>
    where
        E: From<UnexpectedError>,
    {
        let _ = failure;
        Err(UnexpectedError::new(Self::MESSAGE).into())
    }
}

impl Default for UnexpectedError {
    fn default() -> Self {
        Self::new(Self::MESSAGE)
    }
}
