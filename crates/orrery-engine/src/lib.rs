//! Orrery engine crate.
//!
//! Host-side driver for a single animated, full-screen shader scene: this
//! crate owns the platform + GPU runtime pieces, the camera basis math, and
//! the shader program plumbing used by the viewer binary. The image itself
//! is synthesized entirely by the fragment shader the caller supplies.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod camera;
pub mod shader;
pub mod render;
