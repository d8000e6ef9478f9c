//! End-to-end dispatch scenarios: all four sinks configured, listeners on
//! separate tasks, every sink observing the same record.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use panicvisor::{Capture, Handle, PanicInfo};

struct FlagTask {
    ran: Arc<AtomicBool>,
}

#[async_trait]
impl Handle for FlagTask {
    async fn on_panic(&self, info: &PanicInfo) {
        assert_eq!(info.payload_text(), "testing capture struct");
        self.ran.store(true, Ordering::SeqCst);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn all_four_sinks_observe_the_panic() {
    let handler_ran = Arc::new(AtomicBool::new(false));
    let task_ran = Arc::new(AtomicBool::new(false));
    let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(1);

    let mut capture = Capture::new()
        .with_handler({
            let handler_ran = Arc::clone(&handler_ran);
            move |info| {
                assert_eq!(info.payload_text(), "testing capture struct");
                assert!(!info.trace_text().is_empty());
                handler_ran.store(true, Ordering::SeqCst);
            }
        })
        .with_task(Arc::new(FlagTask {
            ran: Arc::clone(&task_ran),
        }))
        .with_channel(tx);
    let token = capture.cancel_token();

    // Listeners on their own tasks, as a real caller would wire them.
    let receiver = tokio::spawn(async move { rx.recv().await });
    let waiter = tokio::spawn({
        let token = token.clone();
        async move { token.cancelled().await }
    });

    let out = capture
        .watch(async {
            panic!("testing capture struct");
        })
        .await;
    assert!(out.is_none());

    let delivered = timeout(Duration::from_secs(5), receiver)
        .await
        .expect("receiver task timed out")
        .expect("receiver task panicked")
        .expect("channel closed without a record");
    assert_eq!(delivered.payload_text(), "testing capture struct");
    assert!(!delivered.trace_text().is_empty());

    timeout(Duration::from_secs(5), waiter)
        .await
        .expect("cancel listener timed out")
        .expect("cancel listener panicked");

    assert!(handler_ran.load(Ordering::SeqCst));
    assert!(task_ran.load(Ordering::SeqCst));
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn clean_scope_touches_no_sink() {
    let handler_ran = Arc::new(AtomicBool::new(false));
    let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(1);

    let mut capture = Capture::new()
        .with_handler({
            let handler_ran = Arc::clone(&handler_ran);
            move |_| handler_ran.store(true, Ordering::SeqCst)
        })
        .with_channel(tx);
    let token = capture.cancel_token();

    let out = capture.watch(async { 5 }).await;
    assert_eq!(out, Some(5));
    assert!(!handler_ran.load(Ordering::SeqCst));
    assert!(rx.try_recv().is_err());
    assert!(!token.is_cancelled());
}

#[tokio::test]
async fn always_cancel_variant_is_idempotent() {
    let mut capture = Capture::new();
    let token = capture.cancel_token();

    // First pass cancels on a clean exit; second pass re-fires the already
    // cancelled token. Neither may panic or block.
    for round in 0..2 {
        let out = timeout(
            Duration::from_secs(5),
            capture.watch_then_cancel(async move { round }),
        )
        .await
        .expect("watch_then_cancel blocked");
        assert_eq!(out, Some(round));
        assert!(token.is_cancelled());
    }
}

#[tokio::test]
async fn shared_cancel_token_unblocks_select_loop() {
    let shared = CancellationToken::new();
    let capture = Capture::new().with_cancel(shared.clone());

    let worker = tokio::spawn({
        let token = shared.clone();
        async move {
            tokio::select! {
                _ = token.cancelled() => "woken by capture",
                _ = tokio::time::sleep(Duration::from_secs(30)) => "timed out",
            }
        }
    });

    let out = capture
        .watch(async {
            panic!("unblock the worker");
        })
        .await;
    assert!(out.is_none());

    let woken = timeout(Duration::from_secs(5), worker)
        .await
        .expect("worker never woke")
        .expect("worker panicked");
    assert_eq!(woken, "woken by capture");
}
