use glam::{Mat4, Vec2, Vec3};

use crate::config::{CameraConfig, OrbitConfig};
use crate::math::Ray;
use crate::model::Model;

/// Perspective camera looking from `position` at `target`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Static Y-up framing used until the orbit takes over
    pub fn framing(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.initial_position,
            target: config.initial_target,
            up: Vec3::Y,
            fov_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        // An up vector parallel to the view direction leaves roll undefined
        let up = if self.up.cross(forward).length_squared() < 1e-10 {
            if forward.y.abs() < 0.9 {
                Vec3::Y
            } else {
                Vec3::Z
            }
        } else {
            self.up
        };
        Mat4::look_to_rh(self.position, forward, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the camera through a point given in normalized device
    /// coordinates
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let on_frustum = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, on_frustum - self.position)
    }

    /// World point to normalized device coordinates, depth in `z` (0 at the
    /// near plane, 1 at the far plane). `None` when the point is not in front
    /// of the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= self.near * 0.5 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }
}

/// Circles the camera around the model centre, one step per frame.
///
/// The camera sits `radius` away from `center` in the XY plane, at height
/// `max.z - height_offset`, with Z up, looking at `center`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitController {
    config: OrbitConfig,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self { config }
    }

    pub fn position_at(&self, model: &Model, angle_degrees: f64) -> Vec3 {
        let theta = angle_degrees.to_radians();
        let radius = self.config.radius as f64;
        Vec3::new(
            (model.center.x as f64 + theta.cos() * radius) as f32,
            (model.center.y as f64 + theta.sin() * radius) as f32,
            model.max.z - self.config.height_offset,
        )
    }

    /// Pose the camera for the current angle, then advance the angle.
    ///
    /// The angle is never wrapped; the trigonometry takes care of periodicity.
    pub fn advance(&self, model: &mut Model, camera: &mut Camera) {
        camera.position = self.position_at(model, model.preview_camera_angle);
        camera.up = Vec3::Z;
        camera.target = model.center;
        model.preview_camera_angle += self.config.step_degrees;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::demo_model;

    #[test]
    fn test_framing_defaults() {
        let camera = Camera::framing(&CameraConfig::default(), 4.0 / 3.0);
        assert_eq!(camera.position, Vec3::new(-60.0, 50.0, 150.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.up, Vec3::Y);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::framing(&CameraConfig::default(), 1.5);
        let ray = camera.ray_through(Vec2::ZERO);
        assert!((ray.direction - camera.forward()).length() < 1e-4);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_project_target_to_center() {
        let camera = Camera::framing(&CameraConfig::default(), 1.0);
        let ndc = camera.project(Vec3::ZERO).unwrap();
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_project_behind_camera() {
        let camera = Camera::framing(&CameraConfig::default(), 1.0);
        let behind = camera.position - camera.forward() * 10.0;
        assert!(camera.project(behind).is_none());
    }

    #[test]
    fn test_orbit_first_step() {
        let mut model = demo_model();
        model.preview_camera_angle = 90.0;
        let mut camera = Camera::framing(&CameraConfig::default(), 1.0);
        let orbit = OrbitController::new(OrbitConfig::default());

        orbit.advance(&mut model, &mut camera);

        assert!((camera.position.x - model.center.x).abs() < 1e-3);
        assert!((camera.position.y - (model.center.y + 115.0)).abs() < 1e-3);
        assert_eq!(camera.position.z, model.max.z - 120.0);
        assert_eq!(camera.up, Vec3::Z);
        assert_eq!(camera.target, model.center);
        assert_eq!(model.preview_camera_angle, 90.5);
    }

    #[test]
    fn test_orbit_view_matrix_is_finite() {
        let mut model = demo_model();
        let mut camera = Camera::framing(&CameraConfig::default(), 1.0);
        let orbit = OrbitController::new(OrbitConfig::default());
        for _ in 0..720 {
            orbit.advance(&mut model, &mut camera);
            assert!(camera.view_projection().is_finite());
        }
        assert_eq!(model.preview_camera_angle, 360.0);
    }
}
