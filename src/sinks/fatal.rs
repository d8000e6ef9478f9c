//! # Terminal diagnostic paths.
//!
//! Every path here writes a human-readable report to stderr — the fatal
//! condition, then payload text, then trace text, trailing newline — and
//! terminates the process with the caller's exit code. None of them return.
//!
//! Keeping the writes here, on the raw stream rather than behind a logging
//! facade, is what makes "no panic is ever silently lost" hold even when the
//! rest of the program is already broken.

use std::process;

use crate::error::FatalError;
use crate::record::PanicInfo;

/// A dispatcher with zero sinks captured a panic.
pub(crate) fn unconfigured(info: &PanicInfo, exit_code: i32) -> ! {
    eprintln!("{}\n{info}", FatalError::Unconfigured);
    process::exit(exit_code)
}

/// The channel sink was closed before the record could be delivered.
///
/// Only the original record is reported: the enqueue is not sink logic
/// executing, so there is no second record to show.
pub(crate) fn delivery_failed(info: &PanicInfo, exit_code: i32) -> ! {
    eprintln!("{}\n{info}", FatalError::ChannelClosed);
    process::exit(exit_code)
}

/// A sink panicked while processing `original`; both records are reported,
/// clearly labeled, then the process dies.
pub(crate) fn nested(original: &PanicInfo, nested: &PanicInfo, exit_code: i32) -> ! {
    eprintln!(
        "{}\noriginal panic:\n{original}\nnested panic:\n{nested}",
        FatalError::NestedPanic
    );
    process::exit(exit_code)
}
