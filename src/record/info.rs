//! # Captured panic snapshot.
//!
//! [`PanicInfo`] is the immutable record built from a panic that unwound a
//! protected scope: the raw payload, its textual rendering, and the backtrace
//! captured at the recovery site.
//!
//! ## Sharing
//! A record is read-only once built. It is `Send + Sync`, so a single
//! `Arc<PanicInfo>` can be handed to every configured sink (and across tasks)
//! without further synchronization.
//!
//! ## Payload access
//! Panic payloads are `Box<dyn Any + Send>` without `Sync`, so the raw value
//! sits behind a mutex that only the payload accessors touch. Most callers
//! should use [`PanicInfo::payload_text`]; the typed accessors exist for
//! sinks that want to recover a structured payload.

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Raw panic payload as produced by the unwind machinery.
pub(crate) type Payload = Box<dyn Any + Send + 'static>;

/// Immutable record of one captured panic.
///
/// Built exclusively by the capture primitives ([`catch`](crate::catch),
/// [`catch_blocking`](crate::catch_blocking)) — a `PanicInfo` existing at all
/// means a panic actually unwound the protected scope; "no panic" is
/// represented by the `Ok` arm of the capture result, never by a zeroed
/// record.
///
/// ## Example
/// ```
/// let info = panicvisor::catch_blocking(|| panic!("boom")).unwrap_err();
/// assert_eq!(info.payload_text(), "boom");
/// assert!(!info.trace_text().is_empty());
/// assert!(info.to_string().starts_with("boom\n"));
/// ```
pub struct PanicInfo {
    payload: Mutex<Option<Payload>>,
    payload_text: String,
    trace_text: String,
}

impl PanicInfo {
    /// Builds a record from a payload and the backtrace captured alongside it.
    ///
    /// Only reachable from a capture primitive observing a real unwind.
    pub(crate) fn from_unwind(payload: Payload, trace: Backtrace) -> Self {
        let payload_text = render_payload(payload.as_ref());
        Self {
            payload: Mutex::new(Some(payload)),
            payload_text,
            trace_text: trace.to_string(),
        }
    }

    /// Textual rendering of the panic payload.
    ///
    /// `&'static str` and `String` payloads render verbatim; anything else
    /// renders as `"unknown panic payload"`.
    pub fn payload_text(&self) -> &str {
        &self.payload_text
    }

    /// Byte rendering of the panic payload.
    pub fn payload_bytes(&self) -> &[u8] {
        self.payload_text.as_bytes()
    }

    /// The backtrace captured at the recovery site, rendered as text.
    pub fn trace_text(&self) -> &str {
        &self.trace_text
    }

    /// Byte rendering of the backtrace.
    pub fn trace_bytes(&self) -> &[u8] {
        self.trace_text.as_bytes()
    }

    /// Whether the raw payload (still present) is of type `T`.
    pub fn payload_is<T: Any>(&self) -> bool {
        let guard = self.payload.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().is_some_and(|p| p.as_ref().is::<T>())
    }

    /// Runs `f` against the raw payload.
    ///
    /// The payload is `None` if a previous caller took it via
    /// [`PanicInfo::take_payload`].
    pub fn with_payload<R>(&self, f: impl FnOnce(Option<&(dyn Any + Send)>) -> R) -> R {
        let guard = self.payload.lock().unwrap_or_else(PoisonError::into_inner);
        f(guard.as_deref())
    }

    /// Removes and returns the raw payload, leaving the textual renderings
    /// intact. Subsequent calls return `None`.
    pub fn take_payload(&self) -> Option<Box<dyn Any + Send>> {
        self.payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// The combined rendering (`payload_text`, newline, trimmed trace) as bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for PanicInfo {
    /// `payload_text`, a newline, then the trace with surrounding whitespace
    /// trimmed. This is the exact shape every diagnostic path prints.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.payload_text, self.trace_text.trim())
    }
}

impl fmt::Debug for PanicInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicInfo")
            .field("payload_text", &self.payload_text)
            .finish_non_exhaustive()
    }
}

/// Renders a payload the way the payload actually panicked:
/// `panic!("literal")` and `panic!("{}", value)` cover almost everything.
fn render_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
