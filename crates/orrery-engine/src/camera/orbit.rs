use glam::Vec3;

use super::basis::CameraParameters;

/// The animated camera path: a circular orbit at fixed height around a fixed
/// look-at target.
///
/// The eye traces `(cos a + 4 sin a, height, -sin a + 4 cos a)` where the
/// angle advances by one radian per `millis_per_radian` milliseconds. The
/// orbit radius is sqrt(17), implied by the two coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    /// World-space point the camera always looks at.
    pub target: Vec3,
    /// Up hint for the basis computation.
    pub up: Vec3,
    /// Constant eye height above the ground plane.
    pub height: f32,
    /// Orbit speed: milliseconds of wall time per radian of orbit angle.
    pub millis_per_radian: f64,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clip distance, passed through to the camera parameters.
    pub near: f32,
    /// Far clip distance, passed through to the camera parameters.
    pub far: f32,
}

impl Default for OrbitPath {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 0.9, 0.0),
            up: Vec3::Y,
            height: 2.8,
            millis_per_radian: 2000.0,
            fov_y: std::f32::consts::PI / 5.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

impl OrbitPath {
    /// Eye position at `timestamp_ms` milliseconds into the animation.
    ///
    /// The angle is kept in f64 so long-running sessions do not lose orbit
    /// precision before the trigonometry is evaluated.
    pub fn eye_at(&self, timestamp_ms: f64) -> Vec3 {
        let angle = timestamp_ms / self.millis_per_radian;
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            (cos + sin * 4.0) as f32,
            self.height,
            (-sin + cos * 4.0) as f32,
        )
    }

    /// Full camera parameters for one frame of the orbit.
    pub fn parameters_at(&self, timestamp_ms: f64, aspect: f32) -> CameraParameters {
        CameraParameters {
            eye: self.eye_at(timestamp_ms),
            center: self.target,
            up: self.up,
            fov_y: self.fov_y,
            aspect,
            near: self.near,
            far: self.far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_at_start_of_animation() {
        let eye = OrbitPath::default().eye_at(0.0);
        assert_eq!(eye, Vec3::new(1.0, 2.8, 4.0));
    }

    #[test]
    fn eye_at_half_orbit() {
        // 2000 * pi milliseconds puts the angle at pi.
        let eye = OrbitPath::default().eye_at(2000.0 * std::f64::consts::PI);
        assert!((eye.x - -1.0).abs() < 1e-4);
        assert_eq!(eye.y, 2.8);
        assert!((eye.z - -4.0).abs() < 1e-4);
    }

    #[test]
    fn orbit_radius_is_constant() {
        let orbit = OrbitPath::default();
        let radius = 17.0f32.sqrt();
        for t in [0.0, 731.0, 5000.0, 12345.0] {
            let eye = orbit.eye_at(t);
            let horizontal = (eye.x * eye.x + eye.z * eye.z).sqrt();
            assert!((horizontal - radius).abs() < 1e-3);
        }
    }

    #[test]
    fn parameters_carry_the_fixed_scene_constants() {
        let params = OrbitPath::default().parameters_at(0.0, 4.0 / 3.0);
        assert_eq!(params.center, Vec3::new(0.0, 0.9, 0.0));
        assert_eq!(params.up, Vec3::Y);
        assert_eq!(params.fov_y, std::f32::consts::PI / 5.0);
        assert_eq!(params.aspect, 4.0 / 3.0);
        assert_eq!(params.near, 1.0);
        assert_eq!(params.far, 1000.0);
    }
}
