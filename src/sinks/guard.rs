//! # Nested-panic guard.
//!
//! Bounds the blast radius of a sink that itself panics while processing a
//! record. On a normal return the guard has no effect; on a second panic it
//! captures the secondary record and takes the terminal path — both records
//! to stderr, then process exit.
//!
//! This path is intentionally not recoverable. A panic while handling a
//! panic means the handling logic itself is broken; continuing risks
//! corrupting further state or entering a panic loop. Guard termination also
//! means no later sink runs, which is the point: past a broken handler
//! nothing is trustworthy.

use std::backtrace::Backtrace;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

use super::fatal;
use crate::record::PanicInfo;

/// Invokes one synchronous sink under the guard.
pub(crate) fn invoke(original: &PanicInfo, exit_code: i32, sink: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(sink)) {
        let secondary = PanicInfo::from_unwind(payload, Backtrace::force_capture());
        fatal::nested(original, &secondary, exit_code);
    }
}

/// Invokes one sink future under the guard.
pub(crate) async fn invoke_future<F>(original: &PanicInfo, exit_code: i32, sink: F)
where
    F: Future<Output = ()>,
{
    if let Err(payload) = AssertUnwindSafe(sink).catch_unwind().await {
        let secondary = PanicInfo::from_unwind(payload, Backtrace::force_capture());
        fatal::nested(original, &secondary, exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::catch_blocking;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // The terminal arm can only be exercised from a subprocess; see
    // tests/fatal.rs. These cover the no-effect arm.

    #[test]
    fn test_well_behaved_sink_runs_once() {
        let original = catch_blocking(|| -> () { panic!("boom") }).unwrap_err();
        let calls = AtomicUsize::new(0);
        invoke(&original, 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_well_behaved_sink_future_runs_once() {
        let original = catch_blocking(|| -> () { panic!("boom") }).unwrap_err();
        let calls = AtomicUsize::new(0);
        invoke_future(&original, 1, async {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
