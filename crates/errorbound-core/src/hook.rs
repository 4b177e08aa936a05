//! Conversion hooks and the call details handed to them.

use std::fmt;
use std::sync::Arc;

/// Diagnostic view of the call a failure was captured in.
///
/// A call-aware hook (installed with
/// [`Boundary::on_unexpected_with_call`](crate::Boundary::on_unexpected_with_call))
/// receives the wrapped call's arguments rendered via their `Debug`
/// representation. The scope form guards a block rather than a call, so
/// its details are empty.
#[derive(Clone, Copy, Default)]
pub struct CallDetails<'a> {
    args: Option<&'a str>,
}

impl<'a> CallDetails<'a> {
    pub(crate) fn none() -> Self {
        Self { args: None }
    }

    pub(crate) fn rendered(args: Option<&'a str>) -> Self {
        Self { args }
    }

    /// Returns the rendered arguments of the wrapped call, if any.
    #[must_use]
    pub fn args(&self) -> Option<&'a str> {
        self.args
    }
}

impl fmt::Debug for CallDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallDetails")
            .field("args", &self.args)
            .finish()
    }
}

type PlainHook<T, E> = Arc<dyn Fn(E) -> Result<T, E> + Send + Sync>;
type CallHook<T, E> = Arc<dyn Fn(E, CallDetails<'_>) -> Result<T, E> + Send + Sync>;

/// A conversion hook, tagged by the signature it was installed with.
///
/// The variant is fixed at construction time; classification never
/// inspects the failure to decide which shape to call.
pub(crate) enum Hook<T: 'static, E: 'static> {
    Plain(PlainHook<T, E>),
    WithCall(CallHook<T, E>),
}

impl<T: 'static, E: 'static> Hook<T, E> {
    pub(crate) fn plain<H>(hook: H) -> Self
    where
        H: Fn(E) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::Plain(Arc::new(hook))
    }

    pub(crate) fn with_call<H>(hook: H) -> Self
    where
        H: Fn(E, CallDetails<'_>) -> Result<T, E> + Send + Sync + 'static,
    {
        Self::WithCall(Arc::new(hook))
    }

    /// Whether invoking this hook can observe call details.
    pub(crate) fn wants_call_details(&self) -> bool {
        matches!(self, Self::WithCall(_))
    }

    pub(crate) fn invoke(&self, failure: E, details: CallDetails<'_>) -> Result<T, E> {
        match self {
            Self::Plain(hook) => hook(failure),
            Self::WithCall(hook) => hook(failure, details),
        }
    }
}

impl<T: 'static, E: 'static> Clone for Hook<T, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(hook) => Self::Plain(Arc::clone(hook)),
            Self::WithCall(hook) => Self::WithCall(Arc::clone(hook)),
        }
    }
}

impl<T: 'static, E: 'static> fmt::Debug for Hook<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("Hook::Plain"),
            Self::WithCall(_) => f.write_str("Hook::WithCall"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxError;

    #[test]
    fn plain_hook_ignores_details() {
        let hook: Hook<i64, BoxError> = Hook::plain(|_| Ok(-1));
        let outcome = hook.invoke("boom".into(), CallDetails::rendered(Some("(1, 2)")));
        assert_eq!(outcome.unwrap(), -1);
        assert!(!hook.wants_call_details());
    }

    #[test]
    fn call_aware_hook_sees_rendered_args() {
        let hook: Hook<i64, BoxError> = Hook::with_call(|failure, details| {
            assert_eq!(details.args(), Some("(4, 0)"));
            Err(failure)
        });
        assert!(hook.wants_call_details());

        let outcome = hook.invoke("boom".into(), CallDetails::rendered(Some("(4, 0)")));
        assert_eq!(outcome.unwrap_err().to_string(), "boom");
    }

    #[test]
    fn scope_details_are_empty() {
        assert_eq!(CallDetails::none().args(), None);
        assert_eq!(CallDetails::default().args(), None);
    }
}
