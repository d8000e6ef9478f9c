//! # panicvisor
//!
//! **Panicvisor** is a structured panic capture and dispatch library for
//! async Rust.
//!
//! It intercepts a panic unwinding a protected scope, converts it into an
//! inspectable [`PanicInfo`] record, and routes that record to the sinks you
//! configured — in a fixed priority order, with a guaranteed last-resort
//! fallback so no panic is ever silently lost.
//!
//! ## Architecture
//! ```text
//!            protected future / closure
//!                      │
//!              panic unwinds the scope
//!                      ▼
//!     ┌────────────────────────────────────┐
//!     │ capture (catch_unwind + backtrace) │      no panic ──► value passes
//!     └────────────────┬───────────────────┘                   through, all
//!                      ▼                                       sinks silent
//!                 PanicInfo (Arc, read-only)
//!                      │
//!     ┌────────────────┴───────────────────┐
//!     │  Capture dispatcher (fixed order)  │
//!     │  1. handler   (HandlerFn)          │──panic inside a sink──► both
//!     │  2. task      (Arc<dyn Handle>)    │   records to stderr, exit
//!     │  3. channel   (mpsc::Sender)       │──channel closed──► record to
//!     │  4. cancel    (CancellationToken)  │   stderr, exit
//!     └────────────────┬───────────────────┘
//!                      │ zero sinks configured
//!                      ▼
//!          record to stderr, process exit
//! ```
//!
//! ## Features
//! | Area            | Description                                             | Key items                              |
//! |-----------------|---------------------------------------------------------|----------------------------------------|
//! | **Record**      | Immutable panic snapshot: payload, text, backtrace.     | [`PanicInfo`]                          |
//! | **Capture**     | Turn an unwind into a record, or pass the value through.| [`catch`], [`catch_blocking`]          |
//! | **Dispatcher**  | Up to four sinks, fixed order, fatal fallback.          | [`Capture`]                            |
//! | **Adapters**    | Single-sink capture points.                             | [`watch_fn`], [`watch_task`], [`watch_channel`] |
//! | **Sinks**       | The contracts a destination implements.                 | [`Handle`], [`HandlerFn`], [`PanicSender`] |
//! | **Errors**      | Names for the terminal conditions.                      | [`FatalError`]                         |
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use panicvisor::{Capture, PanicInfo};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(8);
//!     let mut capture = Capture::new()
//!         .with_handler(|info| eprintln!("captured: {}", info.payload_text()))
//!         .with_channel(tx);
//!     let token = capture.cancel_token();
//!
//!     // A listener elsewhere awaits the outcome of the guarded operation.
//!     let listener = tokio::spawn(async move { token.cancelled().await });
//!
//!     // The scope completes cleanly here, so every sink stays silent;
//!     // had it panicked, the handler would run, the record would land in
//!     // `rx`, and the token would fire — in that order.
//!     let out = capture.watch_then_cancel(async { 21 * 2 }).await;
//!     assert_eq!(out, Some(42));
//!
//!     listener.await.unwrap();
//!     assert!(rx.try_recv().is_err());
//! }
//! ```
//!
//! ## Guarantees
//! - Success is silent: a scope that does not panic touches no sink.
//! - Within one dispatch, sink order is strictly `handler → task → channel →
//!   cancel`; no concurrency is introduced between sinks.
//! - A panic inside a sink, a closed channel, or a dispatcher with nothing
//!   configured all end the same way: a human-readable report on stderr,
//!   then process exit with the configured code (default
//!   [`DEFAULT_EXIT_CODE`]).

mod dispatch;
mod error;
mod record;
mod sinks;

// ---- Public re-exports ----

pub use dispatch::{watch_channel, watch_fn, watch_task, Capture};
pub use error::FatalError;
pub use record::{catch, catch_blocking, PanicInfo};
pub use sinks::{Handle, HandlerFn, PanicSender};

/// Exit status used by the fatal paths when none is configured.
pub const DEFAULT_EXIT_CODE: i32 = 111;
