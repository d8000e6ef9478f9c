//! Sink contracts and the machinery that keeps them safe to invoke.
//!
//! ## Contents
//! - [`HandlerFn`], [`Handle`], [`PanicSender`] — the sink interfaces
//! - `guard` — nested-panic guard wrapping every user sink invocation
//! - `fatal` — the diagnostic-write-and-terminate paths

pub(crate) mod fatal;
pub(crate) mod guard;
mod handler;

pub use handler::{Handle, HandlerFn, PanicSender};
