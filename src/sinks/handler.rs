//! # Sink contracts.
//!
//! The four sink kinds a capture site can deliver to:
//! - [`HandlerFn`] — a boxed callback, the most specific and lightweight hook
//! - [`Handle`] — a capability object exposing one "handle panic" operation
//! - [`PanicSender`] — a bounded channel carrying shared records
//! - `CancellationToken` — a fire-once trigger (consumed directly, no
//!   wrapper needed)
//!
//! Sinks are consumed by this crate, not implemented by it; any of them may
//! itself panic, which the guard turns terminal.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::record::PanicInfo;

/// Callback sink: a unary function over the record, returning nothing.
pub type HandlerFn = Box<dyn Fn(&PanicInfo) + Send + Sync>;

/// Channel sink: bounded conduit of shared records.
///
/// A send blocks the capturing task until a receiver is ready; a send to a
/// closed channel is a delivery fault and is terminal.
pub type PanicSender = mpsc::Sender<Arc<PanicInfo>>;

/// # Task sink: one-method capability for handling a captured panic.
///
/// Implement this on whatever object owns your recovery logic.
///
/// ## Example
/// ```
/// use async_trait::async_trait;
/// use panicvisor::{Handle, PanicInfo};
///
/// struct Alerter;
///
/// #[async_trait]
/// impl Handle for Alerter {
///     async fn on_panic(&self, info: &PanicInfo) {
///         // page someone, write an audit record, ...
///         let _ = info.payload_text();
///     }
/// }
/// ```
#[async_trait]
pub trait Handle: Send + Sync + 'static {
    /// Processes one captured panic record.
    ///
    /// Runs on the capturing task; a panic here is terminal (see the guard).
    async fn on_panic(&self, info: &PanicInfo);

    /// Human-readable name for diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
