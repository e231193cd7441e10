use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

/// Squared-length floor below which a basis vector is considered degenerate.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Camera basis computation failure.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The up hint is parallel to the view direction, or eye equals center.
    /// Either case collapses the cross products to zero vectors.
    #[error("camera basis is degenerate: up is parallel to the view direction")]
    DegenerateBasis,

    /// A documented parameter constraint was violated.
    #[error("invalid camera parameters: {0}")]
    InvalidParameters(&'static str),
}

/// High-level camera description, rebuilt by value every frame.
///
/// `near` and `far` are validated but do not influence the computed basis;
/// they are reserved for the consuming shader, which owns depth handling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraParameters {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Look-at target in world space.
    pub center: Vec3,
    /// Up hint; must not be parallel to `eye - center`.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width over height; must be positive.
    pub aspect: f32,
    /// Near clip distance; positive, less than `far`.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.0, 1.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

impl CameraParameters {
    fn validate(&self) -> Result<(), CameraError> {
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(CameraError::InvalidParameters("aspect must be positive"));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(CameraError::InvalidParameters(
                "clip range requires 0 < near < far",
            ));
        }
        Ok(())
    }
}

/// Column-major 4x4 camera-to-world matrix.
///
/// Columns are the scaled right/up axes, the unit outward view axis, and the
/// eye translation. Reused as an output buffer across frames purely to avoid
/// reallocation; every successful computation overwrites all 16 entries.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraMatrix(pub [f32; 16]);

impl CameraMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Column `i` (0..=3) as a 4-vector.
    #[inline]
    pub fn column(&self, i: usize) -> [f32; 4] {
        let base = i * 4;
        [self.0[base], self.0[base + 1], self.0[base + 2], self.0[base + 3]]
    }
}

impl Default for CameraMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Computes the camera-to-world ray basis into `out`.
///
/// The transform maps a normalized-device-space ray direction plus the eye
/// origin directly into world space:
/// - column x: `normalize(cross(up, z)) * tan(fov/2) * aspect`
/// - column y: `normalize(cross(z, x)) * tan(fov/2)`
/// - column z: `normalize(eye - center)` (points away from the target)
/// - column w: `eye` with homogeneous 1
///
/// Pure apart from writing `out`: identical inputs produce bit-identical
/// output. On any error `out` is left untouched.
pub fn compute_view_basis(
    params: &CameraParameters,
    out: &mut CameraMatrix,
) -> Result<(), CameraError> {
    params.validate()?;

    let z = params.eye - params.center;
    if z.length_squared() <= DEGENERATE_EPSILON {
        return Err(CameraError::DegenerateBasis);
    }

    let x = params.up.cross(z);
    if x.length_squared() <= DEGENERATE_EPSILON {
        return Err(CameraError::DegenerateBasis);
    }

    // x and z are orthogonal and nonzero here, so y cannot collapse.
    let y = z.cross(x);

    let tan_half_fov = (params.fov_y * 0.5).tan();
    let x = x.normalize() * (tan_half_fov * params.aspect);
    let y = y.normalize() * tan_half_fov;
    let z = z.normalize();
    let eye = params.eye;

    out.0 = [
        x.x, x.y, x.z, 0.0, //
        y.x, y.y, y.z, 0.0, //
        z.x, z.y, z.z, 0.0, //
        eye.x, eye.y, eye.z, 1.0,
    ];

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(params: &CameraParameters) -> CameraMatrix {
        let mut m = CameraMatrix::default();
        compute_view_basis(params, &mut m).expect("valid parameters");
        m
    }

    // Columns carry a zero homogeneous component; compare the xyz part.
    fn dot3(a: [f32; 4], b: [f32; 4]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn len3(a: [f32; 4]) -> f32 {
        dot3(a, a).sqrt()
    }

    // ── basis shape ───────────────────────────────────────────────────────

    #[test]
    fn translation_column_equals_eye() {
        let params = CameraParameters {
            eye: Vec3::new(3.5, -2.0, 7.25),
            center: Vec3::new(1.0, 0.5, -4.0),
            ..Default::default()
        };
        let m = compute(&params);
        assert_eq!(m.column(3), [3.5, -2.0, 7.25, 1.0]);
    }

    #[test]
    fn axis_columns_are_pairwise_orthogonal() {
        let params = CameraParameters {
            eye: Vec3::new(2.0, 3.0, -1.0),
            center: Vec3::new(0.0, 0.9, 0.0),
            aspect: 1024.0 / 768.0,
            ..Default::default()
        };
        let m = compute(&params);
        let (x, y, z) = (m.column(0), m.column(1), m.column(2));
        assert!(dot3(x, y).abs() < 1e-5);
        assert!(dot3(x, z).abs() < 1e-5);
        assert!(dot3(y, z).abs() < 1e-5);
    }

    #[test]
    fn axis_columns_carry_fov_and_aspect_scaling() {
        let fov_y = std::f32::consts::PI / 5.0;
        let aspect = 4.0 / 3.0;
        let params = CameraParameters {
            eye: Vec3::new(1.0, 2.8, 4.0),
            center: Vec3::new(0.0, 0.9, 0.0),
            fov_y,
            aspect,
            ..Default::default()
        };
        let m = compute(&params);
        let tan = (fov_y * 0.5).tan();
        assert!((len3(m.column(0)) - tan * aspect).abs() < 1e-5);
        assert!((len3(m.column(1)) - tan).abs() < 1e-5);
        assert!((len3(m.column(2)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn homogeneous_row_is_standard() {
        let m = compute(&CameraParameters::default());
        assert_eq!([m.0[3], m.0[7], m.0[11], m.0[15]], [0.0, 0.0, 0.0, 1.0]);
    }

    // ── reference scenario ────────────────────────────────────────────────

    #[test]
    fn default_parameters_scenario() {
        // eye (0,1,1), center origin, up Y, fov pi/4, aspect 1.
        let m = compute(&CameraParameters::default());

        assert_eq!(m.column(3), [0.0, 1.0, 1.0, 1.0]);

        // z column is the normalized eye-center direction.
        let inv_sqrt2 = 1.0 / 2.0f32.sqrt();
        let z = m.column(2);
        assert!((z[0] - 0.0).abs() < 1e-6);
        assert!((z[1] - inv_sqrt2).abs() < 1e-6);
        assert!((z[2] - inv_sqrt2).abs() < 1e-6);
    }

    // ── purity ────────────────────────────────────────────────────────────

    #[test]
    fn identical_inputs_are_bit_identical() {
        let params = CameraParameters {
            eye: Vec3::new(0.7, 2.8, 3.9),
            center: Vec3::new(0.0, 0.9, 0.0),
            fov_y: std::f32::consts::PI / 5.0,
            aspect: 1024.0 / 768.0,
            ..Default::default()
        };
        let a = compute(&params);
        let b = compute(&params);
        assert_eq!(a.0, b.0);
    }

    #[test]
    fn near_far_do_not_affect_the_matrix() {
        let base = CameraParameters::default();
        let a = compute(&base);
        let b = compute(&CameraParameters {
            near: 0.25,
            far: 50.0,
            ..base
        });
        assert_eq!(a.0, b.0);
    }

    // ── degenerate and invalid inputs ─────────────────────────────────────

    #[test]
    fn up_parallel_to_view_direction_is_rejected() {
        let params = CameraParameters {
            eye: Vec3::new(0.0, 5.0, 0.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            ..Default::default()
        };
        let mut m = CameraMatrix::default();
        assert_eq!(
            compute_view_basis(&params, &mut m),
            Err(CameraError::DegenerateBasis)
        );
        // Output buffer is untouched on failure.
        assert_eq!(m, CameraMatrix::IDENTITY);
    }

    #[test]
    fn eye_equal_to_center_is_rejected() {
        let params = CameraParameters {
            eye: Vec3::new(1.0, 2.0, 3.0),
            center: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let mut m = CameraMatrix::default();
        assert_eq!(
            compute_view_basis(&params, &mut m),
            Err(CameraError::DegenerateBasis)
        );
    }

    #[test]
    fn non_positive_aspect_is_rejected() {
        let params = CameraParameters {
            aspect: 0.0,
            ..Default::default()
        };
        let mut m = CameraMatrix::default();
        assert!(matches!(
            compute_view_basis(&params, &mut m),
            Err(CameraError::InvalidParameters(_))
        ));
    }

    #[test]
    fn inverted_clip_range_is_rejected() {
        let params = CameraParameters {
            near: 10.0,
            far: 1.0,
            ..Default::default()
        };
        let mut m = CameraMatrix::default();
        assert!(matches!(
            compute_view_basis(&params, &mut m),
            Err(CameraError::InvalidParameters(_))
        ));
    }
}
