//! Time subsystem.
//!
//! Provides stable, testable frame timing without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per render loop
//! - call `tick()` once per presented frame to obtain `FrameTime`
//!
//! The scene is a pure function of elapsed time, so `FrameTime` carries the
//! timestamp since clock start rather than a frame delta. Frame intervals
//! are paced externally by the display and must not be assumed constant.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
