//! # Standalone single-sink capture points.
//!
//! Three independent entry points, each delivering to exactly one sink kind
//! and each protected by the nested-panic guard. They are the lightweight
//! alternative to building a [`Capture`](crate::Capture) when one sink is
//! all a scope needs.
//!
//! The sink is taken by value, so "no sink configured" is unrepresentable
//! here; that failure mode only exists on the dispatcher, whose sinks are
//! stateful options. The fatal paths in this module use
//! [`DEFAULT_EXIT_CODE`]; use a dispatcher when the exit code must differ.
//!
//! All three share the same shape: run the scope, pass a clean value
//! through, deliver the record on a panic, return `None` afterwards. Success
//! is silent.

use std::future::Future;
use std::sync::Arc;

use crate::record::{self, PanicInfo};
use crate::sinks::{fatal, guard, Handle, PanicSender};
use crate::DEFAULT_EXIT_CODE;

/// Watches `fut` with a callback sink.
///
/// The callback runs under the nested-panic guard: if it panics, both
/// records are written to stderr and the process exits.
///
/// ## Example
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let out = panicvisor::watch_fn(
///     async {
///         panic!("worker died");
///     },
///     |info| println!("captured: {}", info.payload_text()),
/// )
/// .await;
/// assert!(out.is_none());
/// # }
/// ```
pub async fn watch_fn<F, H>(fut: F, handler: H) -> Option<F::Output>
where
    F: Future,
    H: Fn(&PanicInfo) + Send + Sync,
{
    match record::catch(fut).await {
        Ok(value) => Some(value),
        Err(info) => {
            guard::invoke(&info, DEFAULT_EXIT_CODE, || handler(&info));
            None
        }
    }
}

/// Watches `fut` with a task sink.
///
/// The capability object's [`Handle::on_panic`] runs under the nested-panic
/// guard, same as the callback adapter.
pub async fn watch_task<F, T>(fut: F, task: &T) -> Option<F::Output>
where
    F: Future,
    T: Handle + ?Sized,
{
    match record::catch(fut).await {
        Ok(value) => Some(value),
        Err(info) => {
            guard::invoke_future(&info, DEFAULT_EXIT_CODE, task.on_panic(&info)).await;
            None
        }
    }
}

/// Watches `fut` with a channel sink.
///
/// The send blocks until a receiver is ready. Delivery to a closed channel
/// is a fault in itself — caught locally and converted into a single-record
/// diagnostic write and process exit, distinct from the dual-record nested
/// report (the enqueue is not sink logic executing).
pub async fn watch_channel<F>(fut: F, tx: &PanicSender) -> Option<F::Output>
where
    F: Future,
{
    match record::catch(fut).await {
        Ok(value) => Some(value),
        Err(info) => {
            let info = Arc::new(info);
            if tx.send(Arc::clone(&info)).await.is_err() {
                fatal::delivery_failed(&info, DEFAULT_EXIT_CODE);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    struct Counter(AtomicUsize);

    #[async_trait]
    impl Handle for Counter {
        async fn on_panic(&self, info: &PanicInfo) {
            assert_eq!(info.payload_text(), "task boom");
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_watch_fn_delivers_record() {
        let hits = AtomicUsize::new(0);
        let out = watch_fn(
            async {
                panic!("fn boom");
            },
            |info| {
                assert_eq!(info.payload_text(), "fn boom");
                assert!(!info.trace_text().is_empty());
                hits.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await;
        assert!(out.is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_watch_fn_passes_clean_value_through() {
        let out = watch_fn(async { 9 }, |_| unreachable!("no panic occurred")).await;
        assert_eq!(out, Some(9));
    }

    #[tokio::test]
    async fn test_watch_task_delivers_record() {
        let task = Counter(AtomicUsize::new(0));
        let out = watch_task(
            async {
                panic!("task boom");
            },
            &task,
        )
        .await;
        assert!(out.is_none());
        assert_eq!(task.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_watch_channel_delivers_record() {
        let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(1);
        let out = watch_channel(
            async {
                panic!("chan boom");
            },
            &tx,
        )
        .await;
        assert!(out.is_none());
        let info = rx.try_recv().expect("record delivered");
        assert_eq!(info.payload_text(), "chan boom");
    }

    #[tokio::test]
    async fn test_watch_channel_silent_without_panic() {
        let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(1);
        let out = watch_channel(async { "ok" }, &tx).await;
        assert_eq!(out, Some("ok"));
        assert!(rx.try_recv().is_err());
    }
}
