//! Error types for the fatal dispatch paths.
//!
//! Nothing in this crate is recoverable past a failed sink: every path that
//! cannot deliver a record ends in a diagnostic write and process
//! termination. [`FatalError`] names those conditions and provides the
//! header line of each diagnostic.

use thiserror::Error;

/// # Unrecoverable dispatch failures.
///
/// Each variant corresponds to one terminal path: the diagnostic stream gets
/// this error's message, then the captured record(s), then the process exits
/// with the configured code.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    /// A dispatcher with no sinks configured captured a panic.
    ///
    /// Using the dispatcher with nothing configured is a user error, not a
    /// silent no-op: the caller evidently intended some handling to occur.
    #[error("uninitialized panic dispatcher used: no sinks configured")]
    Unconfigured,

    /// The channel sink's receiver was dropped before the record could be
    /// delivered.
    #[error("panic record undeliverable: channel closed")]
    ChannelClosed,

    /// A sink panicked while processing a record.
    ///
    /// The handling logic itself is broken; continuing risks a panic loop.
    #[error("panic raised inside a panic sink")]
    NestedPanic,
}

impl FatalError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use panicvisor::FatalError;
    ///
    /// assert_eq!(FatalError::Unconfigured.as_label(), "dispatch_unconfigured");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FatalError::Unconfigured => "dispatch_unconfigured",
            FatalError::ChannelClosed => "dispatch_channel_closed",
            FatalError::NestedPanic => "dispatch_nested_panic",
        }
    }
}
