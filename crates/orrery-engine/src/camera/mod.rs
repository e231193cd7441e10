//! Camera subsystem.
//!
//! The camera here is not a conventional view/projection pair. The basis
//! computation produces a camera-to-world transform whose axis columns bake
//! in the field-of-view and aspect scaling, so the fragment shader can
//! reconstruct a world-space ray per pixel with a single matrix multiply.
//!
//! `OrbitPath` supplies the animated eye position: a fixed circular orbit
//! around a fixed look-at target, parameterized by elapsed milliseconds.

mod basis;
mod orbit;

pub use basis::{CameraError, CameraMatrix, CameraParameters, compute_view_basis};
pub use orbit::OrbitPath;
