//! Capture points: the multi-sink dispatcher and the standalone adapters.
//!
//! ## Contents
//! - [`Capture`] — up to four optional sinks, fixed delivery order, fatal
//!   fallback when nothing is configured
//! - [`watch_fn`] / [`watch_task`] / [`watch_channel`] — single-sink entry
//!   points for scopes that only need one destination

mod adapters;
mod capture;

pub use adapters::{watch_channel, watch_fn, watch_task};
pub use capture::Capture;
