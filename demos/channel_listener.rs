//! # Example: channel_listener
//!
//! A pool of workers, each protected by the single-sink channel adapter,
//! funneling every captured panic to one listener.
//!
//! Shows how to:
//! - Use [`watch_channel`] as the capture point for a spawned task.
//! - Drain records on a dedicated listener task.
//!
//! ## Run
//! ```bash
//! cargo run --example channel_listener
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use panicvisor::{watch_channel, PanicInfo};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    std::panic::set_hook(Box::new(|_| {}));

    let (tx, mut rx) = mpsc::channel::<Arc<PanicInfo>>(8);

    let listener = tokio::spawn(async move {
        while let Some(info) = rx.recv().await {
            println!("[listener] worker panicked: {}", info.payload_text());
        }
        println!("[listener] all workers done");
    });

    let mut workers = Vec::new();
    for id in 0..4u32 {
        let tx = tx.clone();
        workers.push(tokio::spawn(async move {
            let out = watch_channel(
                async move {
                    if id % 2 == 1 {
                        panic!("worker {id} hit a poisoned row");
                    }
                    id * 10
                },
                &tx,
            )
            .await;
            println!("[worker {id}] finished with {out:?}");
        }));
    }

    for w in workers {
        w.await.expect("worker task failed");
    }
    drop(tx); // closes the channel once every worker is done
    listener.await.expect("listener failed");
}
