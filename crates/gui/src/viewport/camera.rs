use glam::{Mat4, Vec2, Vec3, Vec4};

use super::picking::Ray;
use crate::state::settings::CameraSettings;

/// Live size of the drawing surface in pixels.
///
/// Screen coordinates used throughout the crate are pixels with the origin at
/// the bottom-left corner of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Screen pixel -> [-1, 1] on both axes
    pub fn normalize(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.width.max(1.0) * 2.0 - 1.0,
            screen.y / self.height.max(1.0) * 2.0 - 1.0,
        )
    }

    /// [-1, 1] -> screen pixel
    pub fn denormalize(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (ndc.y + 1.0) * 0.5 * self.height,
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Perspective camera orbiting the world origin.
///
/// The camera keeps its view matrix and the inverse in sync; every space
/// conversion in the editor goes through these two matrices.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    view: Mat4,
    view_inv: Mat4,
    /// Vertical field of view (degrees)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl OrbitCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let (a, b) = (settings.elevation, settings.azimuth);
        let eye = settings.distance * Vec3::new(a.cos() * b.cos(), a.cos() * b.sin(), a.sin());

        let mut camera = Self {
            view: Mat4::IDENTITY,
            view_inv: Mat4::IDENTITY,
            fov: settings.fov,
            near: settings.near,
            far: settings.far,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
        };
        camera.look_at(eye, Vec3::ZERO, Vec3::Z);
        camera
    }

    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.set_view(Mat4::look_at_rh(eye, target, up));
    }

    fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.view_inv = view.inverse();
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Inverse view matrix (camera -> world)
    pub fn view_matrix_inverse(&self) -> Mat4 {
        self.view_inv
    }

    /// Post-multiply a world-space transform into the view. With a rotation
    /// about the origin this orbits the camera around the scene.
    pub fn apply_transform(&mut self, transform: Mat4) {
        self.set_view(self.view * transform);
    }

    /// Move towards (`factor > 1`) or away from the world origin
    pub fn zoom(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let origin_cam = self.view.transform_point3(Vec3::ZERO);
        let dist = origin_cam.length();
        if dist < 1e-6 {
            return;
        }
        let new_dist = (dist / factor).clamp(self.min_distance, self.max_distance);
        let shifted = origin_cam * (new_dist / dist);
        self.set_view(Mat4::from_translation(shifted - origin_cam) * self.view);
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        self.camera_to_world(Vec3::ZERO)
    }

    /// Distance from the eye to the world origin
    pub fn distance(&self) -> f32 {
        self.view.transform_point3(Vec3::ZERO).length()
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view
    }

    fn focal(&self) -> f32 {
        (self.fov * 0.5).to_radians().tan()
    }

    /// Point in camera space on the pixel's ray, `depth` units in front of the eye
    fn screen_to_camera(&self, screen: Vec2, viewport: &Viewport, depth: f32) -> Vec3 {
        let ndc = viewport.normalize(screen);
        let focal = self.focal();
        Vec3::new(
            ndc.x * focal * viewport.aspect() * depth,
            ndc.y * focal * depth,
            -depth,
        )
    }

    /// World point on the pixel's ray at the given distance along the view axis
    pub fn screen_to_world_at_depth(&self, screen: Vec2, viewport: &Viewport, depth: f32) -> Vec3 {
        self.camera_to_world(self.screen_to_camera(screen, viewport, depth))
    }

    /// World point on the pixel's ray whose camera-space z equals `camera_z`
    /// (negative in front of the camera)
    pub fn screen_to_world(&self, screen: Vec2, viewport: &Viewport, camera_z: f32) -> Vec3 {
        self.screen_to_world_at_depth(screen, viewport, -camera_z)
    }

    /// Cast a ray from the eye through a screen position
    pub fn screen_ray(&self, screen: Vec2, viewport: &Viewport) -> Ray {
        Ray {
            origin: self.eye_position(),
            direction: self
                .view_inv
                .transform_vector3(self.screen_to_camera(screen, viewport, 1.0)),
        }
    }

    pub fn world_to_camera(&self, p: Vec3) -> Vec3 {
        self.view.transform_point3(p)
    }

    pub fn camera_to_world(&self, p: Vec3) -> Vec3 {
        self.view_inv.transform_point3(p)
    }

    /// Project a world point to screen pixels (bottom-left origin).
    /// Returns None for points behind the camera.
    pub fn project(&self, point: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let p = self.view_projection(viewport.aspect()) * Vec4::from((point, 1.0));
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        Some(viewport.denormalize(Vec2::new(ndc.x, ndc.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera() -> OrbitCamera {
        let mut camera = OrbitCamera::default();
        camera.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        camera
    }

    #[test]
    fn test_default_pose_distance() {
        let camera = OrbitCamera::default();
        assert!((camera.distance() - 5.0).abs() < 1e-4);
        assert!(camera.eye_position().z > 0.0);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = front_camera();
        let viewport = Viewport::new(800.0, 600.0);
        let ray = camera.screen_ray(viewport.center(), &viewport);
        assert!((ray.origin - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!((ray.direction.normalize() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_screen_to_world_depth() {
        let camera = front_camera();
        let viewport = Viewport::new(800.0, 600.0);
        let p = camera.screen_to_world(viewport.center(), &viewport, -5.0);
        assert!(p.length() < 1e-5);

        let q = camera.screen_to_world_at_depth(viewport.center(), &viewport, 1.0);
        assert!((q - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
        assert!((camera.world_to_camera(q).z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_screen_to_world_uses_live_viewport() {
        let camera = OrbitCamera::default();
        let mut viewport = Viewport::new(800.0, 600.0);
        let before = camera.screen_to_world(Vec2::new(600.0, 450.0), &viewport, -3.0);

        // Same normalized position after the window doubled in size
        viewport.resize(1600.0, 1200.0);
        let after = camera.screen_to_world(Vec2::new(1200.0, 900.0), &viewport, -3.0);
        assert!((before - after).length() < 1e-5);

        // The old pixel now maps somewhere else
        let stale = camera.screen_to_world(Vec2::new(600.0, 450.0), &viewport, -3.0);
        assert!((before - stale).length() > 1e-2);
    }

    #[test]
    fn test_project_inverts_screen_to_world() {
        let camera = OrbitCamera::default();
        let viewport = Viewport::new(640.0, 480.0);
        let screen = Vec2::new(100.0, 350.0);
        let world = camera.screen_to_world(screen, &viewport, -2.5);
        let back = camera.project(world, &viewport).unwrap();
        assert!((back - screen).length() < 1e-2);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = OrbitCamera::default();
        camera.apply_transform(Mat4::from_axis_angle(Vec3::Z, 0.7));
        assert!((camera.distance() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_moves_towards_origin_and_clamps() {
        let mut camera = OrbitCamera::default();
        camera.zoom(1.25);
        assert!((camera.distance() - 4.0).abs() < 1e-4);

        camera.zoom(1000.0);
        assert!((camera.distance() - CameraSettings::default().min_distance).abs() < 1e-4);

        // Looking direction is unchanged by zoom
        let viewport = Viewport::default();
        let dir = camera.screen_ray(viewport.center(), &viewport).direction.normalize();
        assert!((dir + camera.eye_position().normalize()).length() < 1e-4);
    }
}
