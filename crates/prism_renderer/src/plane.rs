//! Infinite plane primitive.

use std::sync::Arc;

use crate::{HitRecord, Intersect, Material};
use prism_math::{Interval, Ray, Vec3, Vec3Ext};

/// Rays closer to parallel than this miss.
const PARALLEL_EPSILON: f32 = 1e-6;

/// The plane `normal · p + distance = 0`.
#[derive(Clone, Debug)]
pub struct Plane {
    normal: Vec3,
    distance: f32,
    tangent: Vec3,
    material: Arc<Material>,
}

impl Plane {
    /// Create a plane. A non-unit normal is normalized and the distance
    /// scaled with it, so the plane itself does not move.
    pub fn new(normal: Vec3, distance: f32, material: Arc<Material>) -> Self {
        let length = normal.length();
        let normal = normal.unit();
        let distance = distance / length;
        let tangent = Vec3::ONE.cross(normal).normalize_or_zero();
        Self {
            normal,
            distance,
            tangent,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

impl Intersect for Plane {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let denominator = self.normal.dot(ray.direction());
        if denominator.abs() <= PARALLEL_EPSILON {
            return None;
        }
        let t = -(self.distance + self.normal.dot(ray.origin())) / denominator;
        if t <= 0.0 || !ray_t.surrounds(t) {
            return None;
        }

        let position = ray.at(t);
        Some(
            HitRecord::new(t, position, self.normal, ray.direction().incident_direction(), &self.material)
                .with_tangent(self.tangent),
        )
    }
}
