//! Example: substituting a domain failure, with call diagnostics.
//!
//! A call-aware hook observes the captured failure and the wrapped call's
//! arguments before replacing both with a domain-specific failure.
//!
//! Run with:
//! ```bash
//! RUST_LOG=errorbound=trace cargo run --example custom_failure
//! ```

use errorbound::logging::warn;
use errorbound::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
struct DivideByZero;

#[derive(Debug, thiserror::Error)]
#[error("transaction rejected")]
struct TransactionRejected;

fn sensitive_transaction(x: &str, y: &str) -> Result<i64, BoxError> {
    let x: i64 = x.trim().parse()?;
    let y: i64 = y.trim().parse()?;
    if y == 0 {
        return Err(DivideByZero.into());
    }
    Ok(x / y)
}

fn main() {
    env_logger::init();

    let boundary: Boundary<i64, BoxError> =
        Boundary::expecting([Kind::of::<DivideByZero>()]).on_unexpected_with_call(
            |failure, details| {
                warn!(
                    "hiding failure `{failure}` from call with args {:?}",
                    details.args()
                );
                Err(TransactionRejected.into())
            },
        );
    let transfer = boundary.wrap(|(x, y): (&str, &str)| sensitive_transaction(x, y));

    for case in [("4", "2"), ("4", "0"), ("a", "b")] {
        match transfer(case) {
            Ok(value) => println!("{case:?} -> {value}"),
            Err(failure) => println!("{case:?} -> failed: {failure}"),
        }
    }
}
