//! Triangle primitive for ray tracing.
//!
//! Intersection solves `A + u(B - A) + v(C - A) = O + tD` for `(u, v, t)`
//! with a 3x3 linear system; a singular system (ray parallel to the
//! triangle) is a miss.

use std::sync::Arc;

use crate::{HitRecord, Intersect, Material};
use prism_math::{Interval, Mat3, Ray, Vec3, Vec3Ext};

/// Systems with a smaller determinant are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-12;

/// A triangle primitive, flat-shaded unless vertex normals are supplied.
#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [Vec3; 3],
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    tangent: Vec3,
    vertex_normals: Option<[Vec3; 3]>,
    material: Arc<Material>,
}

impl Triangle {
    /// Create a flat triangle. Panics if the vertices are collinear.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: Arc<Material>) -> Self {
        let normal = (b - a).cross(c - a).unit();
        Self {
            vertices: [a, b, c],
            normal,
            tangent: (b - a).unit(),
            vertex_normals: None,
            material,
        }
    }

    /// Create a triangle that interpolates per-vertex normals.
    pub fn with_vertex_normals(a: Vec3, b: Vec3, c: Vec3, normals: [Vec3; 3], material: Arc<Material>) -> Self {
        let mut triangle = Self::new(a, b, c, material);
        triangle.vertex_normals = Some(normals.map(|n| n.normalize_or_zero()));
        triangle
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn is_smooth(&self) -> bool {
        self.vertex_normals.is_some()
    }

    fn shading_normal(&self, u: f32, v: f32) -> Vec3 {
        match self.vertex_normals {
            Some([na, nb, nc]) => ((1.0 - u - v) * na + u * nb + v * nc)
                .try_normalize()
                .unwrap_or(self.normal),
            None => self.normal,
        }
    }
}

impl Intersect for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let [a, b, c] = self.vertices;
        let system = Mat3::from_cols(b - a, c - a, -ray.direction());
        if system.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }

        let solution = system.inverse() * (ray.origin() - a);
        let (u, v, t) = (solution.x, solution.y, solution.z);
        if u < 0.0 || v < 0.0 || u + v > 1.0 || !ray_t.surrounds(t) {
            return None;
        }

        let normal = self.shading_normal(u, v);
        Some(
            HitRecord::new(t, ray.at(t), normal, ray.direction().incident_direction(), &self.material)
                .with_tangent(self.tangent)
                .with_uv(u, v),
        )
    }
}
