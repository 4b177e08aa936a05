//! Example: converting unexpected failures into a fallback value.
//!
//! The conversion hook returns `Ok(-1)`, so unexpected failures become an
//! ordinary value while the declared kind still surfaces verbatim.
//!
//! Run with:
//! ```bash
//! RUST_LOG=errorbound=debug cargo run --example fallback_value
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
        Boundary::expecting([Kind::of::<DivideByZero>()]).on_unexpected(|_| Ok(-1));

    // The scope form guards a block instead of a call.
    let outcome = boundary.scope(|| sensitive_transaction("4", "2"));
    println!("4 / 2 -> {outcome:?}");

    let outcome = boundary.scope(|| sensitive_transaction("4", "0"));
    println!("4 / 0 -> {outcome:?}");

    let outcome = boundary.scope(|| sensitive_transaction("a", "b"));
    println!("a / b -> {outcome:?}");
}
