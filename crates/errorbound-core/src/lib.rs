//! Core types for errorbound.
//!
//! This crate provides the failure-classification boundary:
//! - [`Boundary`] bundling expected failure kinds with a conversion hook
//! - [`Kind`] selectors (downcast-based and predicate-based)
//! - [`UnexpectedError`], the built-in conversion signal
//! - The [`Classify`] extension for already-computed results
//!
//! # Design Principles
//!
//! - One shared classification routine; the function-wrapping and scope
//!   forms are thin adapters over it
//! - Classification is total: every failure inside a guarded region is
//!   either passed through verbatim or converted, never leaked raw
//! - Boundaries are stateless values, cheap to clone and safe to share
//! - Panics are execution signaling, not failures; they are never
//!   intercepted

#![forbid(unsafe_code)]

mod boundary;
mod error;
mod hook;
mod kind;
pub mod logging;

pub use boundary::{Boundary, Classify};
pub use error::{BoxError, UnexpectedError};
pub use hook::CallDetails;
pub use kind::Kind;
