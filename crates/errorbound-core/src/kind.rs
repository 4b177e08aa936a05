//! Failure-kind selectors.
//!
//! A [`Kind`] decides whether a failure belongs to a boundary's expected
//! set. Two selector forms cover the two dominant Rust error shapes:
//!
//! - [`Kind::of`] matches a concrete error type behind a [`BoxError`]
//!   by downcast, the dynamic-error analog of matching an error class.
//! - [`Kind::matching`] wraps an arbitrary predicate, which is the form
//!   to reach for with enum error types (`matches!` on the variants).

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::BoxError;

/// A selector for one expected failure kind.
///
/// Selectors are cheap to clone and carry a human-readable label used in
/// diagnostics and logging. A failure is accepted by a boundary's expected
/// set if any of its selectors accepts it; selectors are consulted in
/// declaration order, and the first match decides the label that gets
/// logged.
pub struct Kind<E: 'static> {
    label: Cow<'static, str>,
    test: Arc<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E: 'static> Kind<E> {
    /// Creates a selector from a label and a predicate over the failure.
    ///
    /// This is the general form, suited to enum error types:
    ///
    /// ```
    /// use errorbound_core::Kind;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// enum TransferError {
    ///     #[error("insufficient funds")]
    ///     InsufficientFunds,
    ///     #[error("ledger offline")]
    ///     LedgerOffline,
    /// }
    ///
    /// let kind = Kind::matching("insufficient-funds", |e: &TransferError| {
    ///     matches!(e, TransferError::InsufficientFunds)
    /// });
    /// assert!(kind.accepts(&TransferError::InsufficientFunds));
    /// assert!(!kind.accepts(&TransferError::LedgerOffline));
    /// ```
    pub fn matching<F>(label: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    /// Returns the selector's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns whether this selector accepts the given failure.
    #[must_use]
    pub fn accepts(&self, failure: &E) -> bool {
        (self.test)(failure)
    }
}

impl Kind<BoxError> {
    /// Creates a selector accepting boxed failures of the concrete type `K`.
    ///
    /// The label defaults to the type's fully qualified name.
    ///
    /// ```
    /// use std::num::ParseIntError;
    ///
    /// use errorbound_core::{BoxError, Kind};
    ///
    /// let kind = Kind::of::<ParseIntError>();
    /// let failure: BoxError = "oops".parse::<i64>().unwrap_err().into();
    /// assert!(kind.accepts(&failure));
    /// ```
    #[must_use]
    pub fn of<K>() -> Self
    where
        K: std::error::Error + 'static,
    {
        Self::matching(std::any::type_name::<K>(), |failure: &BoxError| {
            failure.downcast_ref::<K>().is_some()
        })
    }
}

impl<E: 'static> Clone for Kind<E> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<E: 'static> fmt::Debug for Kind<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
