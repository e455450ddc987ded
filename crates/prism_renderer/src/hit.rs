//! Intersection and specular sampling records.

use crate::{Color, Intersectable, Material};
use prism_math::Vec3;

/// Record of a ray-object intersection.
///
/// A missed ray produces no record at all (`None` from `intersect`), so a
/// `HitRecord` that exists always describes a real hit, or a sampled point
/// on a light source (see [`HitRecord::light_sample`]).
#[derive(Clone, Copy, Debug)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs, always > 0 for geometry hits
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal on the geometry's outward side (not flipped toward the ray)
    pub normal: Vec3,
    /// Surface tangent, zero when the primitive does not define one
    pub tangent: Vec3,
    /// Unit direction from the hit back toward the ray origin
    pub w_in: Vec3,
    /// Surface coordinates (barycentric for triangles)
    pub u: f32,
    pub v: f32,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Primitive that was hit; `None` for light samples
    pub primitive: Option<&'a Intersectable>,
}

impl<'a> HitRecord<'a> {
    /// Create a geometry hit record.
    pub fn new(t: f32, position: Vec3, normal: Vec3, w_in: Vec3, material: &'a Material) -> Self {
        Self {
            t,
            position,
            normal,
            tangent: Vec3::ZERO,
            w_in,
            u: 0.0,
            v: 0.0,
            material,
            primitive: None,
        }
    }

    /// Pseudo-record for a point sampled on a light source.
    ///
    /// Only position and material are meaningful; the zero normal tells the
    /// integrator the light has no orientation.
    pub fn light_sample(position: Vec3, material: &'a Material) -> Self {
        Self::new(0.0, position, Vec3::ZERO, Vec3::ZERO, material)
    }

    pub fn with_tangent(mut self, tangent: Vec3) -> Self {
        self.tangent = tangent;
        self
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.u = u;
        self.v = v;
        self
    }

    pub fn with_primitive(mut self, primitive: &'a Intersectable) -> Self {
        self.primitive = Some(primitive);
        self
    }
}

/// Result of sampling a specular (delta) lobe.
///
/// A lobe that cannot be sampled (total internal reflection, or a material
/// without that lobe) yields `None` instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingSample {
    /// Throughput weight applied to the radiance arriving along `w`
    pub brdf: Color,
    /// Outgoing direction, pointing away from the surface
    pub w: Vec3,
    pub is_specular: bool,
    /// Probability of choosing this lobe
    pub p: f32,
}

impl ShadingSample {
    pub fn specular(brdf: Color, w: Vec3, p: f32) -> Self {
        Self {
            brdf,
            w,
            is_specular: true,
            p,
        }
    }
}
