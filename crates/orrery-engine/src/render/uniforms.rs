use bytemuck::{Pod, Zeroable};

use crate::camera::CameraMatrix;

/// Per-frame uniform block, uploaded once per frame.
///
/// Field order and padding mirror the WGSL declaration at group 0 binding 0:
///
/// ```wgsl
/// struct FrameUniforms {
///     camera: mat4x4<f32>,   // column-major, not transposed
///     resolution: vec2<f32>, // viewport size in pixels
///     time: i32,             // milliseconds since start, truncated
/// }
/// ```
///
/// WGSL rounds the struct size up to its 16-byte alignment; the trailing pad
/// makes the host layout agree.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FrameUniforms {
    pub camera: CameraMatrix,
    pub resolution: [f32; 2],
    pub time_ms: i32,
    pub _pad: u32,
}

impl FrameUniforms {
    pub fn new(camera: CameraMatrix, resolution: [f32; 2], time_ms: i32) -> Self {
        Self {
            camera,
            resolution,
            time_ms,
            _pad: 0,
        }
    }

    /// Minimum binding size of the uniform buffer.
    ///
    /// The struct is non-empty by construction, so this cannot fail.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .expect("FrameUniforms has non-zero size by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn layout_matches_the_wgsl_block() {
        assert_eq!(size_of::<FrameUniforms>(), 80);
        assert_eq!(offset_of!(FrameUniforms, camera), 0);
        assert_eq!(offset_of!(FrameUniforms, resolution), 64);
        assert_eq!(offset_of!(FrameUniforms, time_ms), 72);
    }

    #[test]
    fn camera_matrix_is_stored_unchanged() {
        let camera = CameraMatrix::IDENTITY;
        let u = FrameUniforms::new(camera, [1024.0, 768.0], 16);
        assert_eq!(u.camera, camera);
        assert_eq!(u.resolution, [1024.0, 768.0]);
        assert_eq!(u.time_ms, 16);
    }
}
