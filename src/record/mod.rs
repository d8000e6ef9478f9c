//! Panic records and the capture primitives that build them.
//!
//! ## Contents
//! - [`PanicInfo`] — immutable snapshot of a captured panic
//! - [`catch`] / [`catch_blocking`] — run a scope, converting an unwind into
//!   a record
//!
//! The rest of the crate never touches `catch_unwind` directly; this module
//! is the only place the language's unwind machinery appears.

mod info;
mod unwind;

pub use info::PanicInfo;
pub use unwind::{catch, catch_blocking};
