use crate::Vec3;

/// Offset applied along the direction of secondary rays so they do not
/// re-hit the surface they start on.
pub const RAY_EPSILON: f32 = 1e-4;

/// A ray in 3D space.
///
/// Primary rays carry the pixel `(row, col)` they were generated for and start
/// exactly at the camera eye. Secondary rays (reflection, refraction, shadow)
/// carry no pixel and have their origin nudged by [`RAY_EPSILON`] along the
/// direction. The direction is not required to be unit length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Pixel this ray was generated for, if any
    pub pixel: Option<(u32, u32)>,
    /// Number of specular bounces taken to reach this ray
    pub bounces: u32,
}

impl Ray {
    /// Create a plain ray with no pixel, no bounces and no perturbation.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            pixel: None,
            bounces: 0,
        }
    }

    /// Create a camera ray for pixel `(row, col)`.
    pub fn primary(origin: Vec3, direction: Vec3, row: u32, col: u32) -> Self {
        Self {
            origin,
            direction,
            pixel: Some((row, col)),
            bounces: 0,
        }
    }

    /// Create a perturbed secondary ray leaving a surface.
    pub fn secondary(origin: Vec3, direction: Vec3, bounces: u32) -> Self {
        Self {
            origin: origin + RAY_EPSILON * direction,
            direction,
            pixel: None,
            bounces,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_primary_ray_is_not_perturbed() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::primary(origin, Vec3::NEG_Z, 4, 7);

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.pixel, Some((4, 7)));
        assert_eq!(ray.bounces, 0);
    }

    #[test]
    fn test_secondary_ray_is_perturbed() {
        let ray = Ray::secondary(Vec3::ZERO, Vec3::Y, 2);

        assert_eq!(ray.origin(), Vec3::new(0.0, RAY_EPSILON, 0.0));
        assert_eq!(ray.direction(), Vec3::Y);
        assert_eq!(ray.pixel, None);
        assert_eq!(ray.bounces, 2);
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::new(Vec3::ZERO, Vec3::Y);
        let ray2 = ray1; // Copy, not move

        assert_eq!(ray1.origin, ray2.origin);
        assert_eq!(ray1.at(1.0), ray2.at(1.0));
    }
}
