//! Platform window + event loop runtime.
//!
//! Drives exactly one window. Frames are paced by redraw requests against
//! the display's refresh signal; the "schedule next frame" step is a
//! request, not a timing guarantee.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
