//! # Example: dispatcher
//!
//! Demonstrates the full four-sink dispatcher on a panicking workload.
//!
//! Shows how to:
//! - Configure a [`Capture`] with handler, task, channel and cancel sinks.
//! - Implement the [`Handle`] trait on a capability object.
//! - Wire listeners for the channel and the cancellation token.
//!
//! ## Flow
//! ```text
//! worker future ──panic("worker 3 lost its connection")──► Capture::watch
//!     ├─► handler prints the payload                 (1st)
//!     ├─► Auditor::on_panic prints the record length (2nd)
//!     ├─► channel listener receives the Arc<PanicInfo> (3rd)
//!     └─► cancel token wakes the standby task        (last)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example dispatcher
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use panicvisor::{Capture, Handle, PanicInfo};

/// A capability object that owns some recovery logic.
struct Auditor;

#[async_trait]
impl Handle for Auditor {
    async fn on_panic(&self, info: &PanicInfo) {
        println!(
            "[auditor] recorded panic ({} bytes of trace)",
            info.trace_bytes().len()
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Keep the default hook quiet so the demo output is the sinks' output.
    std::panic::set_hook(Box::new(|_| {}));

    let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(8);
    let mut capture = Capture::new()
        .with_handler(|info| println!("[handler] payload: {}", info.payload_text()))
        .with_task(Arc::new(Auditor))
        .with_channel(tx);
    let token = capture.cancel_token();

    let listener = tokio::spawn(async move {
        if let Some(info) = rx.recv().await {
            println!("[channel] received: {}", info.payload_text());
        }
    });
    let standby = tokio::spawn({
        let token = token.clone();
        async move {
            token.cancelled().await;
            println!("[standby] woken by cancellation, cleaning up");
        }
    });

    let out = capture
        .watch(async {
            panic!("worker 3 lost its connection");
        })
        .await;
    println!("[main] watch returned {out:?}");

    listener.await.expect("listener failed");
    standby.await.expect("standby failed");
}
