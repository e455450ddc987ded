//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{HitRecord, Intersect, Material};
use prism_math::{Interval, Ray, Vec3, Vec3Ext};

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn sphere_uv(p: Vec3) -> (f32, f32) {
        // theta: angle down from +Y, phi: angle around Y from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;
        (phi / (2.0 * PI), theta / PI)
    }
}

impl Intersect for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Nearest root first; fall back to the far root when the origin is inside.
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let position = ray.at(root);
        let normal = (position - self.center) / self.radius;
        let (u, v) = Self::sphere_uv(normal);
        Some(
            HitRecord::new(root, position, normal, ray.direction().incident_direction(), &self.material)
                .with_uv(u, v),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Diffuse};

    fn unit_sphere(center: Vec3) -> Sphere {
        Sphere::new(center, 0.5, Arc::new(Material::Diffuse(Diffuse::new(Color::splat(0.5)))))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere(Vec3::new(0.0, 0.0, -1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray, Interval::POSITIVE).unwrap();
        assert!((hit.t - 0.5).abs() < 0.001);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert!((hit.w_in - Vec3::Z).length() < 1e-6);
        assert!(hit.primitive.is_none());
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere(Vec3::new(0.0, 0.0, -1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect(&ray, Interval::POSITIVE).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = unit_sphere(Vec3::new(0.0, 0.0, 2.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray, Interval::POSITIVE).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = unit_sphere(Vec3::ZERO);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.intersect(&ray, Interval::POSITIVE).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-5);
        // Outward normal, not flipped toward the ray
        assert!((hit.normal - Vec3::X).length() < 1e-5);
        assert!(hit.normal.dot(hit.w_in) < 0.0);
    }

    #[test]
    fn test_sphere_respects_interval() {
        let sphere = unit_sphere(Vec3::new(0.0, 0.0, -3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray, Interval::new(0.0, 2.0)).is_none());
    }
}
