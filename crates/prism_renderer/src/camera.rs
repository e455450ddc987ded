//! Pinhole camera for primary ray generation.

use prism_math::{Ray, Vec3, Vec3Ext};

/// Pinhole camera. Row 0 is the top image row.
///
/// Every `with_*` call recomputes the cached basis, so a camera is always
/// ready to generate rays.
#[derive(Clone, Debug)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    eye: Vec3,
    look_at: Vec3,
    up: Vec3,
    /// Vertical field of view in degrees
    fov: f32,

    // Cached basis and image-plane bounds at distance 1
    u: Vec3,
    v: Vec3,
    w: Vec3,
    top: f32,
    bottom: f32,
    left: f32,
    right: f32,
}

impl Camera {
    /// Create a camera at +5 Z looking at the origin.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 640,
            image_height: 480,
            eye: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
        };
        camera.initialize();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.initialize();
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, eye: Vec3, look_at: Vec3, up: Vec3) -> Self {
        self.eye = eye;
        self.look_at = look_at;
        self.up = up;
        self.initialize();
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self.initialize();
        self
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    fn initialize(&mut self) {
        self.w = (self.eye - self.look_at).unit();
        self.u = self.up.cross(self.w).unit();
        self.v = self.w.cross(self.u);

        self.top = (self.fov.to_radians() / 2.0).tan();
        self.bottom = -self.top;
        self.right = self.aspect_ratio() * self.top;
        self.left = -self.right;
    }

    /// Primary ray through pixel (`row`, `col`) at sub-pixel offset `sample` in [0, 1)².
    pub fn make_worldspace_ray(&self, row: u32, col: u32, sample: [f32; 2]) -> Ray {
        let [s1, s2] = sample;
        let u_ij = self.left + (self.right - self.left) * (col as f32 + s1) / self.image_width as f32;
        let v_ij = self.top - (self.top - self.bottom) * (row as f32 + s2) / self.image_height as f32;
        let direction = (self.u * u_ij + self.v * v_ij - self.w).unit();
        Ray::primary(self.eye, direction, row, col)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: [f32; 2] = [0.5, 0.5];

    #[test]
    fn test_center_pixel_looks_at_target() {
        let camera = Camera::new().with_resolution(3, 3);
        let ray = camera.make_worldspace_ray(1, 1, CENTER);
        assert!((ray.direction() - -Vec3::Z).length() < 1e-6);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(ray.pixel, Some((1, 1)));
        assert_eq!(ray.bounces, 0);
    }

    #[test]
    fn test_row_zero_is_top() {
        let camera = Camera::new().with_resolution(4, 4);
        let top = camera.make_worldspace_ray(0, 2, [0.0, 0.5]);
        let bottom = camera.make_worldspace_ray(3, 2, [0.0, 0.5]);
        assert!(top.direction().y > 0.0);
        assert!(bottom.direction().y < 0.0);

        let left = camera.make_worldspace_ray(2, 0, [0.5, 0.0]);
        assert!(left.direction().x < 0.0);
    }

    #[test]
    fn test_field_of_view_edges() {
        let camera = Camera::new().with_resolution(2, 2).with_fov(90.0);
        // Top-left corner of the image plane sits at (-1, 1, -1) in camera space
        let corner = camera.make_worldspace_ray(0, 0, [0.0, 0.0]);
        let expected = Vec3::new(-1.0, 1.0, -1.0).normalize();
        assert!((corner.direction() - expected).length() < 1e-5);
    }

    #[test]
    fn test_aspect_ratio_widens_horizontal_extent() {
        let camera = Camera::new().with_resolution(200, 100).with_fov(90.0);
        let right_edge = camera.make_worldspace_ray(50, 199, [1.0, 0.0]);
        let d = right_edge.direction();
        assert!((d.x / -d.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_directions_are_unit_length() {
        let camera = Camera::new()
            .with_resolution(8, 6)
            .with_position(Vec3::new(3.0, 2.0, 1.0), Vec3::ZERO, Vec3::Y);
        for row in 0..6 {
            for col in 0..8 {
                let ray = camera.make_worldspace_ray(row, col, CENTER);
                assert!((ray.direction().length() - 1.0).abs() < 1e-5);
            }
        }
    }
}
