//! # Capture primitives.
//!
//! The single language-specific dependency of the crate: observe a panic
//! unwinding the exact scope being protected and turn it into a
//! [`PanicInfo`], or pass the scope's value through untouched.
//!
//! Everything above this layer (guards, adapters, the dispatcher) is built
//! against the `Result<R, PanicInfo>` contract only.
//!
//! ## Rules
//! - The backtrace is captured in the recovering frame, before any other
//!   control transfer, so the trace and the "was there a panic" observation
//!   are atomic with respect to the unwind.
//! - `AssertUnwindSafe` is used deliberately: the protected state is either
//!   consumed by the scope or handed to sinks as an immutable record, never
//!   resumed.

use std::backtrace::Backtrace;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

use super::info::PanicInfo;

/// Runs `fut`, converting a panic that unwinds it into a [`PanicInfo`].
///
/// Returns `Ok` with the future's output when no panic occurred. A record is
/// only ever built on the `Err` path.
///
/// ## Example
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ok = panicvisor::catch(async { 2 + 2 }).await;
/// assert_eq!(ok.unwrap(), 4);
///
/// let err = panicvisor::catch(async { panic!("boom") }).await;
/// assert_eq!(err.unwrap_err().payload_text(), "boom");
/// # }
/// ```
pub async fn catch<F>(fut: F) -> Result<F::Output, PanicInfo>
where
    F: Future,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(value) => Ok(value),
        Err(payload) => Err(PanicInfo::from_unwind(payload, Backtrace::force_capture())),
    }
}

/// Blocking counterpart of [`catch`] for synchronous scopes.
pub fn catch_blocking<F, R>(f: F) -> Result<R, PanicInfo>
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => Err(PanicInfo::from_unwind(payload, Backtrace::force_capture())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_scope_passes_value_through() {
        let out = catch_blocking(|| 7);
        assert_eq!(out.unwrap(), 7);
    }

    #[test]
    fn test_panicking_scope_yields_record() {
        let info = catch_blocking(|| -> () { panic!("sync boom") }).unwrap_err();
        assert_eq!(info.payload_text(), "sync boom");
        assert!(!info.trace_text().is_empty());
    }

    #[test]
    fn test_formatted_panic_message_is_captured() {
        let info = catch_blocking(|| -> () { panic!("worker {} died", 3) }).unwrap_err();
        assert_eq!(info.payload_text(), "worker 3 died");
    }

    #[tokio::test]
    async fn test_async_scope_is_captured() {
        let ok = catch(async { "done" }).await;
        assert_eq!(ok.unwrap(), "done");

        let info = catch(async {
            panic!("async boom");
        })
        .await
        .unwrap_err();
        assert_eq!(info.payload_text(), "async boom");
    }
}
