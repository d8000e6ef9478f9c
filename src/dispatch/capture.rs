//! # Multi-sink panic dispatcher.
//!
//! [`Capture`] aggregates up to four independently-optional sinks and, when
//! the future it watches panics, delivers the record to the configured ones
//! in a fixed, non-configurable order:
//!
//! ```text
//! panic ──► PanicInfo ──► handler ──► task ──► channel ──► cancel
//!                          (1st)     (2nd)     (3rd)      (last)
//! ```
//!
//! ## Why this order
//! The handler is the most specific, lightweight hook — a pure function of
//! the record — and runs first so a later-failing sink cannot prevent basic
//! observability. Task and channel are heavier, potentially blocking sinks.
//! Cancellation runs last because its listeners are typically other tasks
//! waiting on the outcome; they should only wake after all synchronous
//! handling has completed.
//!
//! ## Rules
//! - Absent sinks are skipped; that is not an error.
//! - All four absent + a panic captured = the unconfigured fatal fallback.
//! - A sink that panics is terminal (nested-panic guard); later sinks do
//!   not run.
//! - Configuration is set before use and read-only during capture; the
//!   dispatcher takes no internal locks.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::record::{self, PanicInfo};
use crate::sinks::{fatal, guard, Handle, HandlerFn, PanicSender};
use crate::DEFAULT_EXIT_CODE;

/// # Aggregate capture point with up to four sinks.
///
/// Build one per logical operation you want guarded, configure the sinks you
/// care about, then run the operation through [`Capture::watch`].
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use panicvisor::{Capture, PanicInfo};
/// use tokio::sync::mpsc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(8);
/// let mut capture = Capture::new().with_channel(tx);
/// let token = capture.cancel_token();
///
/// let out = capture.watch(async { 21 * 2 }).await;
/// assert_eq!(out, Some(42));          // clean scope: sinks untouched
/// assert!(!token.is_cancelled());
/// assert!(rx.try_recv().is_err());
/// # }
/// ```
pub struct Capture {
    handler: Option<HandlerFn>,
    task: Option<Arc<dyn Handle>>,
    channel: Option<PanicSender>,
    cancel: Option<CancellationToken>,
    exit_code: i32,
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}

impl Capture {
    /// Creates a dispatcher with no sinks and the default exit code
    /// ([`DEFAULT_EXIT_CODE`]).
    ///
    /// Configure at least one sink before watching anything: capturing a
    /// panic with nothing configured is the fatal fallback, by design.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler: None,
            task: None,
            channel: None,
            cancel: None,
            exit_code: DEFAULT_EXIT_CODE,
        }
    }

    /// Sets the callback sink. Called first on dispatch.
    #[must_use]
    pub fn with_handler(mut self, f: impl Fn(&PanicInfo) + Send + Sync + 'static) -> Self {
        self.handler = Some(Box::new(f));
        self
    }

    /// Sets the task sink. Called second on dispatch.
    #[must_use]
    pub fn with_task(mut self, task: Arc<dyn Handle>) -> Self {
        self.task = Some(task);
        self
    }

    /// Sets the channel sink. Records are sent third on dispatch.
    #[must_use]
    pub fn with_channel(mut self, tx: PanicSender) -> Self {
        self.channel = Some(tx);
        self
    }

    /// Sets the cancellation sink. Fired last on dispatch.
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Sets the exit code used by the fatal paths.
    #[must_use]
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Mints a fresh [`CancellationToken`], installs it as the cancel sink
    /// (overwriting any previously configured one), and returns a handle to
    /// await.
    ///
    /// The token is root-level, not derived from any other token.
    pub fn cancel_token(&mut self) -> CancellationToken {
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        token
    }

    /// Whether any sink is configured.
    pub fn has_sinks(&self) -> bool {
        self.handler.is_some()
            || self.task.is_some()
            || self.channel.is_some()
            || self.cancel.is_some()
    }

    /// The exit code the fatal paths will use.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Runs `fut` under this dispatcher.
    ///
    /// - No panic: returns `Some(output)`; no sink is touched, success is
    ///   silent.
    /// - Panic: builds the record, delivers it per the fixed sink order,
    ///   returns `None`.
    /// - Panic with zero sinks configured: writes the record to stderr and
    ///   terminates with [`Capture::exit_code`].
    pub async fn watch<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        match record::catch(fut).await {
            Ok(value) => Some(value),
            Err(info) => {
                self.dispatch(Arc::new(info)).await;
                None
            }
        }
    }

    /// Like [`Capture::watch`], but always fires the cancel sink (if one is
    /// configured) on the way out, panic or not.
    ///
    /// Useful for "tear down this scope's listeners on any exit". Firing the
    /// token twice is safe; cancellation is idempotent.
    pub async fn watch_then_cancel<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        let out = self.watch(fut).await;
        if let Some(token) = &self.cancel {
            token.cancel();
        }
        out
    }

    /// Delivers one record to every configured sink, in order.
    async fn dispatch(&self, info: Arc<PanicInfo>) {
        if !self.has_sinks() {
            fatal::unconfigured(&info, self.exit_code);
        }
        if let Some(handler) = &self.handler {
            guard::invoke(&info, self.exit_code, || handler(&info));
        }
        if let Some(task) = &self.task {
            guard::invoke_future(&info, self.exit_code, task.on_panic(&info)).await;
        }
        if let Some(tx) = &self.channel {
            if tx.send(Arc::clone(&info)).await.is_err() {
                fatal::delivery_failed(&info, self.exit_code);
            }
        }
        if let Some(token) = &self.cancel {
            token.cancel();
        }
    }
}
