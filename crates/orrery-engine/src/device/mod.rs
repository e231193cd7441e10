//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//!
//! The surface is configured for an opaque scene: composite alpha prefers
//! `Opaque`, and no depth or stencil attachment is ever created. The
//! fragment shader does its own depth reasoning.

mod context;
mod error;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use init::GpuInit;

/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the
/// surface texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
