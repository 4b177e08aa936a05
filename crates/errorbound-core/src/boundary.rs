//! The failure-classification boundary.
//!
//! [`Boundary`] wraps fallible operations and normalizes what comes out of
//! them: failure kinds declared expected surface verbatim, every other
//! failure is routed through a conversion hook. Both activation forms (the
//! function-wrapping form and the scope form) delegate to one private
//! classification routine, so their behavior is identical by construction.

use std::fmt;

use log::{debug, trace};

use crate::error::UnexpectedError;
use crate::hook::{CallDetails, Hook};
use crate::kind::Kind;
use crate::logging::targets;

/// Classifies failures at a call boundary.
///
/// A `Boundary` bundles an ordered set of expected failure kinds with a
/// conversion hook. Running code under the boundary guarantees exactly one
/// of three outcomes:
///
/// - the region succeeds and its value is returned unchanged,
/// - the region fails with an expected kind and the identical failure is
///   returned, untouched, or
/// - the region fails with anything else and the hook decides the outcome:
///   its `Ok` becomes the region's result, its `Err` propagates instead.
///
/// The default hook fails with [`UnexpectedError`] carrying the fixed
/// message `"Unexpected error"`, deliberately discarding the captured
/// failure's detail. Install a custom hook to preserve detail.
///
/// Hook failures are not re-classified; nested boundaries each classify
/// independently as a failure travels outward. Panics are never
/// intercepted; classification applies to `Err` values only.
///
/// # Thread Safety
///
/// A `Boundary` holds no mutable state. It is `Clone` (cheap, selectors
/// and hooks sit behind `Arc`) and one instance may be used from multiple
/// threads concurrently without synchronization.
///
/// # Example
///
/// ```
/// use std::num::ParseIntError;
///
/// use errorbound_core::{Boundary, BoxError, Kind, UnexpectedError};
///
/// fn parse_port(raw: &str) -> Result<u16, BoxError> {
///     Ok(raw.trim().parse::<u16>()?)
/// }
///
/// let boundary: Boundary<u16, BoxError> =
///     Boundary::expecting([Kind::of::<ParseIntError>()]);
///
/// // Success and expected failures surface unchanged.
/// assert_eq!(boundary.scope(|| parse_port("8080")).unwrap(), 8080);
/// assert!(boundary
///     .scope(|| parse_port("not-a-port"))
///     .unwrap_err()
///     .is::<ParseIntError>());
///
/// // Anything else collapses into the built-in signal.
/// let failure = boundary.scope(|| Err("disk on fire".into())).unwrap_err();
/// assert!(failure.is::<UnexpectedError>());
/// assert_eq!(failure.to_string(), "Unexpected error");
/// ```
pub struct Boundary<T: 'static, E: 'static> {
    expected: Vec<Kind<E>>,
    hook: Hook<T, E>,
}

impl<T: 'static, E: 'static> Boundary<T, E>
where
    E: From<UnexpectedError>,
{
    /// Creates a boundary that passes the given kinds through verbatim and
    /// converts everything else with the default hook.
    ///
    /// The kind set may be empty; nothing is then ever passed through and
    /// every failure is converted.
    #[must_use]
    pub fn expecting<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = Kind<E>>,
    {
        Self {
            expected: kinds.into_iter().collect(),
            hook: Hook::plain(UnexpectedError::deny::<T, E>),
        }
    }
}

impl<T: 'static, E: 'static> Boundary<T, E> {
    /// Creates a boundary with an explicit conversion hook.
    ///
    /// Unlike [`expecting`](Self::expecting), this puts no `From` bound on
    /// the failure type, which suits error enums that have no room for the
    /// built-in signal:
    ///
    /// ```
    /// use errorbound_core::{Boundary, Kind};
    ///
    /// #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    /// enum RelayError {
    ///     #[error("queue full")]
    ///     QueueFull,
    ///     #[error("link down")]
    ///     LinkDown,
    /// }
    ///
    /// let boundary = Boundary::converting(
    ///     [Kind::matching("queue-full", |e: &RelayError| {
    ///         matches!(e, RelayError::QueueFull)
    ///     })],
    ///     |_| Ok(0_u32),
    /// );
    ///
    /// assert_eq!(
    ///     boundary.scope(|| Err(RelayError::QueueFull)).unwrap_err(),
    ///     RelayError::QueueFull
    /// );
    /// assert_eq!(boundary.scope(|| Err(RelayError::LinkDown)).unwrap(), 0);
    /// ```
    pub fn converting<I, H>(kinds: I, hook: H) -> Self
    where
        I: IntoIterator<Item = Kind<E>>,
        H: Fn(E) -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            expected: kinds.into_iter().collect(),
            hook: Hook::plain(hook),
        }
    }

    /// Replaces the conversion hook.
    ///
    /// The hook receives the captured failure by value. Returning `Ok`
    /// makes that value the guarded region's outcome; returning `Err`
    /// propagates that failure instead. The captured failure is never
    /// stored by the boundary.
    #[must_use]
    pub fn on_unexpected<H>(mut self, hook: H) -> Self
    where
        H: Fn(E) -> Result<T, E> + Send + Sync + 'static,
    {
        self.hook = Hook::plain(hook);
        self
    }

    /// Replaces the conversion hook with a call-aware one.
    ///
    /// In the function-wrapping form the hook additionally receives
    /// [`CallDetails`] describing the original call's arguments. The scope
    /// form guards a block rather than a call, so its details are empty.
    /// Which shape gets invoked is fixed here, at construction time.
    #[must_use]
    pub fn on_unexpected_with_call<H>(mut self, hook: H) -> Self
    where
        H: Fn(E, CallDetails<'_>) -> Result<T, E> + Send + Sync + 'static,
    {
        self.hook = Hook::with_call(hook);
        self
    }

    /// Returns whether the failure matches any expected kind.
    #[must_use]
    pub fn is_expected(&self, failure: &E) -> bool {
        self.matched_kind(failure).is_some()
    }

    /// Runs a block of code under the boundary.
    ///
    /// Classification runs on every exit path of the block: a success is
    /// returned unchanged, an expected failure passes through verbatim,
    /// and anything else goes through the conversion hook.
    pub fn scope<F>(&self, region: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.classify(region, CallDetails::none())
    }

    /// Wraps a fallible function, returning a callable with the same
    /// signature that classifies every failure the function produces.
    ///
    /// Multiple arguments travel as a tuple. The wrapper owns a clone of
    /// the boundary, so it outlives the borrow used to create it. When a
    /// call-aware hook is installed the arguments are rendered via `Debug`
    /// before the call; with a plain hook no rendering happens.
    ///
    /// # Example
    ///
    /// ```
    /// use std::num::ParseIntError;
    ///
    /// use errorbound_core::{Boundary, BoxError, Kind};
    ///
    /// let boundary: Boundary<i64, BoxError> =
    ///     Boundary::expecting([Kind::of::<ParseIntError>()]);
    ///
    /// let parse_sum = boundary.wrap(|(a, b): (&str, &str)| {
    ///     Ok(a.parse::<i64>()? + b.parse::<i64>()?)
    /// });
    ///
    /// assert_eq!(parse_sum(("2", "3")).unwrap(), 5);
    /// assert!(parse_sum(("2", "x")).unwrap_err().is::<ParseIntError>());
    /// ```
    pub fn wrap<Args, F>(&self, f: F) -> impl Fn(Args) -> Result<T, E> + use<T, E, Args, F>
    where
        Args: fmt::Debug,
        F: Fn(Args) -> Result<T, E>,
    {
        let boundary = self.clone();
        move |args| {
            let rendered = boundary
                .hook
                .wants_call_details()
                .then(|| format!("{args:?}"));
            boundary.classify(|| f(args), CallDetails::rendered(rendered.as_deref()))
        }
    }

    /// Wraps a zero-argument fallible function.
    ///
    /// Equivalent to [`wrap`](Self::wrap) without the tuple plumbing; the
    /// hook sees empty call details.
    pub fn wrap_fn<F>(&self, f: F) -> impl Fn() -> Result<T, E> + use<T, E, F>
    where
        F: Fn() -> Result<T, E>,
    {
        let boundary = self.clone();
        move || boundary.classify(&f, CallDetails::none())
    }

    /// The shared classification routine. Both activation forms build a
    /// thunk and end up here.
    fn classify<F>(&self, region: F, details: CallDetails<'_>) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        match region() {
            Ok(value) => Ok(value),
            Err(failure) => match self.matched_kind(&failure) {
                Some(kind) => {
                    trace!(
                        target: targets::BOUNDARY,
                        "expected kind `{}` passed through verbatim",
                        kind.label()
                    );
                    Err(failure)
                }
                None => {
                    debug!(
                        target: targets::BOUNDARY,
                        "unclassified failure intercepted; invoking conversion hook"
                    );
                    if let Some(args) = details.args() {
                        trace!(target: targets::HOOK, "captured call arguments: {args}");
                    }
                    self.hook.invoke(failure, details)
                }
            },
        }
    }

    fn matched_kind<'b>(&'b self, failure: &E) -> Option<&'b Kind<E>> {
        self.expected.iter().find(|kind| kind.accepts(failure))
    }
}

impl<T: 'static, E: 'static> Clone for Boundary<T, E> {
    fn clone(&self) -> Self {
        Self {
            expected: self.expected.clone(),
            hook: self.hook.clone(),
        }
    }
}

impl<T: 'static, E: 'static> fmt::Debug for Boundary<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.expected.iter().map(Kind::label).collect();
        f.debug_struct("Boundary")
            .field("expected", &labels)
            .field("hook", &self.hook)
            .finish()
    }
}

/// Routes an already-computed result through a boundary.
///
/// Sugar for `boundary.scope(|| result)`, useful when the fallible call
/// has already happened:
///
/// ```
/// use std::num::ParseIntError;
///
/// use errorbound_core::{Boundary, BoxError, Classify, Kind};
///
/// let boundary: Boundary<i64, BoxError> =
///     Boundary::expecting([Kind::of::<ParseIntError>()]);
///
/// let outcome = "17".parse::<i64>()
///     .map_err(BoxError::from)
///     .classify_with(&boundary);
/// assert_eq!(outcome.unwrap(), 17);
/// ```
pub trait Classify<T: 'static, E: 'static> {
    /// Classifies `self` against the boundary's expected set.
    fn classify_with(self, boundary: &Boundary<T, E>) -> Result<T, E>;
}

impl<T: 'static, E: 'static> Classify<T, E> for Result<T, E> {
    fn classify_with(self, boundary: &Boundary<T, E>) -> Result<T, E> {
        boundary.scope(|| self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::BoxError;

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    #[error("division by zero")]
    struct DivideByZero;

    #[derive(Debug, thiserror::Error)]
    #[error("audit rejected: {0}")]
    struct AuditRejected(String);

    fn sensitive_transaction(x: &str, y: &str) -> Result<i64, BoxError> {
        let x: i64 = x.trim().parse()?;
        let y: i64 = y.trim().parse()?;
        if y == 0 {
            return Err(DivideByZero.into());
        }
        Ok(x / y)
    }

    fn guarded() -> Boundary<i64, BoxError> {
        Boundary::expecting([Kind::of::<DivideByZero>()])
    }

    #[test]
    fn scope_returns_success_unchanged() {
        assert_eq!(
            guarded().scope(|| sensitive_transaction("4", "2")).unwrap(),
            2
        );
    }

    #[test]
    fn wrap_returns_success_unchanged() {
        let wrapped = guarded().wrap(|(x, y): (&str, &str)| sensitive_transaction(x, y));
        assert_eq!(wrapped(("4", "2")).unwrap(), 2);
    }

    #[test]
    fn wrap_fn_guards_zero_argument_functions() {
        let boundary = guarded();

        let fetch = boundary.wrap_fn(|| sensitive_transaction("6", "3"));
        assert_eq!(fetch().unwrap(), 2);

        let failing = boundary.wrap_fn(|| sensitive_transaction("a", "b"));
        assert!(failing().unwrap_err().is::<UnexpectedError>());
    }

    #[test]
    fn expected_kind_passes_through_both_forms() {
        let boundary = guarded();

        let from_scope = boundary
            .scope(|| sensitive_transaction("4", "0"))
            .unwrap_err();
        assert!(from_scope.is::<DivideByZero>());
        assert_eq!(from_scope.to_string(), "division by zero");

        let wrapped = boundary.wrap(|(x, y): (&str, &str)| sensitive_transaction(x, y));
        let from_wrap = wrapped(("4", "0")).unwrap_err();
        assert!(from_wrap.is::<DivideByZero>());
    }

    #[test]
    fn expected_failure_keeps_its_identity() {
        let failure: BoxError = DivideByZero.into();
        let addr = std::ptr::from_ref(&*failure).cast::<()>();

        let returned = guarded().scope(|| Err(failure)).unwrap_err();
        assert_eq!(std::ptr::from_ref(&*returned).cast::<()>(), addr);
    }

    #[test]
    fn unexpected_failure_collapses_to_fixed_signal() {
        let failure = guarded()
            .scope(|| sensitive_transaction("a", "b"))
            .unwrap_err();

        let signal = failure.downcast_ref::<UnexpectedError>().unwrap();
        assert_eq!(signal.message(), "Unexpected error");
        // The parse failure's detail must not leak through the default hook.
        assert!(!failure.to_string().contains("invalid digit"));
    }

    #[test]
    fn custom_hook_supplies_fallback_value() {
        let boundary = guarded().on_unexpected(|_| Ok(-1));

        assert_eq!(
            boundary.scope(|| sensitive_transaction("a", "b")).unwrap(),
            -1
        );
        // Expected kinds still win over the hook.
        assert!(boundary
            .scope(|| sensitive_transaction("4", "0"))
            .unwrap_err()
            .is::<DivideByZero>());
    }

    #[test]
    fn empty_expected_set_converts_everything() {
        let boundary: Boundary<i64, BoxError> = Boundary::expecting([]);

        let failure = boundary
            .scope(|| sensitive_transaction("4", "0"))
            .unwrap_err();
        assert!(failure.is::<UnexpectedError>());
    }

    #[test]
    fn hook_failure_becomes_the_outcome() {
        let boundary = guarded()
            .on_unexpected(|failure| Err(AuditRejected(failure.to_string()).into()));

        let outcome = boundary
            .scope(|| sensitive_transaction("a", "b"))
            .unwrap_err();

        // The hook observed the original failure's detail intact.
        let audit = outcome.downcast_ref::<AuditRejected>().unwrap();
        assert!(audit.0.contains("invalid digit"));
    }

    #[test]
    fn call_aware_hook_receives_rendered_arguments() {
        let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let boundary = {
            let seen = Arc::clone(&seen);
            guarded().on_unexpected_with_call(move |failure, details| {
                *seen.lock().unwrap() = details.args().map(str::to_owned);
                Err(failure)
            })
        };

        let wrapped = boundary.wrap(|(x, y): (&str, &str)| sensitive_transaction(x, y));
        let failure = wrapped(("a", "b")).unwrap_err();

        assert!(failure.to_string().contains("invalid digit"));
        assert_eq!(seen.lock().unwrap().as_deref(), Some(r#"("a", "b")"#));
    }

    #[test]
    fn scope_form_passes_no_call_details() {
        let seen: Arc<Mutex<Option<Option<String>>>> = Arc::new(Mutex::new(None));
        let boundary = {
            let seen = Arc::clone(&seen);
            guarded().on_unexpected_with_call(move |failure, details| {
                *seen.lock().unwrap() = Some(details.args().map(str::to_owned));
                Err(failure)
            })
        };

        let _ = boundary.scope(|| sensitive_transaction("a", "b"));
        assert_eq!(*seen.lock().unwrap(), Some(None));
    }

    #[test]
    fn double_wrapping_is_observationally_idempotent() {
        let boundary = guarded();
        let once = boundary.wrap(|(x, y): (&str, &str)| sensitive_transaction(x, y));
        let twice =
            boundary.wrap(boundary.wrap(|(x, y): (&str, &str)| sensitive_transaction(x, y)));

        for case in [("4", "2"), ("4", "0"), ("a", "b")] {
            match (once(case), twice(case)) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(a), Err(b)) => {
                    assert_eq!(a.to_string(), b.to_string());
                    assert_eq!(a.is::<DivideByZero>(), b.is::<DivideByZero>());
                    assert_eq!(a.is::<UnexpectedError>(), b.is::<UnexpectedError>());
                }
                (a, b) => panic!("wrapping depth changed the outcome: {a:?} vs {b:?}"),
            }
        }
    }

    #[test]
    fn nested_boundaries_classify_independently() {
        let inner = guarded();
        let outer: Boundary<i64, BoxError> =
            Boundary::expecting([Kind::of::<UnexpectedError>()]);

        // The inner boundary converts the parse failure; the outer one has
        // declared the signal expected and passes it through verbatim.
        let failure = outer
            .scope(|| inner.scope(|| sensitive_transaction("a", "b")))
            .unwrap_err();
        assert!(failure.is::<UnexpectedError>());

        // Expected kinds of the inner boundary cross the outer one too,
        // converted there since DivideByZero is not in the outer set.
        let failure = outer
            .scope(|| inner.scope(|| sensitive_transaction("4", "0")))
            .unwrap_err();
        assert!(failure.is::<UnexpectedError>());
    }

    #[test]
    fn one_boundary_shared_across_threads() {
        let boundary = guarded();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(
                        boundary.scope(|| sensitive_transaction("9", "3")).unwrap(),
                        3
                    );
                    assert!(boundary
                        .scope(|| sensitive_transaction("9", "0"))
                        .unwrap_err()
                        .is::<DivideByZero>());
                });
            }
        });
    }

    #[test]
    fn enum_failures_match_by_variant() {
        #[derive(Debug, thiserror::Error)]
        enum TransferError {
            #[error("insufficient funds")]
            InsufficientFunds,
            #[error("ledger offline")]
            LedgerOffline,
            #[error(transparent)]
            Unexpected(#[from] UnexpectedError),
        }

        let boundary: Boundary<u32, TransferError> =
            Boundary::expecting([Kind::matching("insufficient-funds", |e: &TransferError| {
                matches!(e, TransferError::InsufficientFunds)
            })]);

        assert!(matches!(
            boundary.scope(|| Err(TransferError::InsufficientFunds)),
            Err(TransferError::InsufficientFunds)
        ));
        match boundary.scope(|| Err(TransferError::LedgerOffline)) {
            Err(TransferError::Unexpected(signal)) => {
                assert_eq!(signal.message(), "Unexpected error");
            }
            other => panic!("expected the built-in signal, got {other:?}"),
        }
    }

    #[test]
    fn classify_ext_matches_scope_form() {
        let boundary = guarded();

        assert_eq!(
            sensitive_transaction("8", "2")
                .classify_with(&boundary)
                .unwrap(),
            4
        );
        assert!(sensitive_transaction("8", "0")
            .classify_with(&boundary)
            .unwrap_err()
            .is::<DivideByZero>());
        assert!(sensitive_transaction("a", "b")
            .classify_with(&boundary)
            .unwrap_err()
            .is::<UnexpectedError>());
    }

    #[test]
    fn is_expected_consults_every_selector() {
        let boundary: Boundary<i64, BoxError> = Boundary::expecting([
            Kind::of::<DivideByZero>(),
            Kind::matching("timeout", |e: &BoxError| e.to_string().contains("timed out")),
        ]);

        assert!(boundary.is_expected(&DivideByZero.into()));
        assert!(boundary.is_expected(&"request timed out".into()));
        assert!(!boundary.is_expected(&"request refused".into()));
    }

    #[test]
    fn debug_lists_expected_labels_and_hook_shape() {
        let rendered = format!("{:?}", guarded());
        assert!(rendered.contains("DivideByZero"));
        assert!(rendered.contains("Hook::Plain"));

        let rendered = format!(
            "{:?}",
            guarded().on_unexpected_with_call(|failure, _| Err(failure))
        );
        assert!(rendered.contains("Hook::WithCall"));
    }
}
