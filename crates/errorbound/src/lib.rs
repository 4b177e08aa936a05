#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use errorbound_core::logging;
pub use errorbound_core::{Boundary, BoxError, CallDetails, Classify, Kind, UnexpectedError};

/// Commonly used items, glob-importable.
///
/// ```
/// use errorbound::prelude::*;
///
/// let boundary: Boundary<u8, BoxError> = Boundary::expecting([]);
/// assert_eq!(boundary.scope(|| Ok(7)).unwrap(), 7);
/// ```
pub mod prelude {
    pub use errorbound_core::{Boundary, BoxError, Classify, Kind, UnexpectedError};
}
