//! Example: guarding a risky parse-and-divide routine.
//!
//! Declares `DivideByZero` expected at the boundary; every other failure
//! (here, parse failures) collapses into `UnexpectedError`.
//!
//! Run with:
//! ```bash
//! RUST_LOG=errorbound=trace cargo run --example sensitive_transaction
//! ```

use errorbound::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
struct DivideByZero;

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
        Boundary::expecting([Kind::of::<DivideByZero>()]);
    let transfer = boundary.wrap(|(x, y): (&str, &str)| sensitive_transaction(x, y));

    for case in [("4", "2"), ("4", "0"), ("a", "b")] {
        match transfer(case) {
            Ok(value) => println!("{case:?} -> {value}"),
            Err(failure) => println!("{case:?} -> failed: {failure}"),
        }
    }
}
