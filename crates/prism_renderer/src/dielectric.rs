//! Refractive (glass-like) material with Fresnel-weighted lobes.

use crate::{Brdf, Color, HitRecord, ShadingSample};
use prism_math::Vec3;

/// Schlick's approximation of Fresnel reflectance.
///
/// `cos_theta_i` is the cosine between the incident direction and the
/// interface normal on the incident side. Returns 1 under total internal
/// reflection.
pub fn schlick(cos_theta_i: f32, n1: f32, n2: f32) -> f32 {
    let cos_i = cos_theta_i.clamp(0.0, 1.0);
    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    let cos = if n1 <= n2 {
        cos_i
    } else {
        let eta = n1 / n2;
        let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return 1.0;
        }
        (1.0 - sin2_t).sqrt()
    };
    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}

/// Both sides of the interface, oriented for a particular hit.
struct Interface {
    n1: f32,
    n2: f32,
    /// Normal on the incident side
    normal: Vec3,
    cos_i: f32,
}

/// Dielectric boundary between vacuum and a medium of index `ior`.
#[derive(Clone, Debug, PartialEq)]
pub struct Refractive {
    pub ior: f32,
    pub ks: Color,
}

impl Refractive {
    pub fn new(ior: f32, ks: Color) -> Self {
        Self { ior, ks }
    }

    fn interface(&self, hit: &HitRecord) -> Interface {
        // w_in on the normal's side means the ray arrives from outside.
        let entering = hit.normal.dot(hit.w_in) > 0.0;
        let (n1, n2, normal) = if entering {
            (1.0, self.ior, hit.normal)
        } else {
            (self.ior, 1.0, -hit.normal)
        };
        Interface {
            n1,
            n2,
            normal,
            cos_i: hit.w_in.dot(normal).min(1.0),
        }
    }

    /// Fraction of light reflected at this hit.
    pub fn fresnel(&self, hit: &HitRecord) -> f32 {
        let side = self.interface(hit);
        schlick(side.cos_i, side.n1, side.n2)
    }
}

impl Brdf for Refractive {
    fn evaluate_brdf(&self, _hit: &HitRecord, _w_out: Vec3, _w_in: Vec3) -> Color {
        Color::ZERO
    }

    fn has_specular_reflection(&self) -> bool {
        true
    }

    fn has_specular_refraction(&self) -> bool {
        true
    }

    fn casts_shadows(&self) -> bool {
        false
    }

    fn evaluate_specular_reflection(&self, hit: &HitRecord) -> Option<ShadingSample> {
        let side = self.interface(hit);
        let r = schlick(side.cos_i, side.n1, side.n2);
        let w = 2.0 * side.cos_i * side.normal - hit.w_in;
        Some(ShadingSample::specular(Color::splat(r), w, r))
    }

    fn evaluate_specular_refraction(&self, hit: &HitRecord) -> Option<ShadingSample> {
        let side = self.interface(hit);
        let eta = side.n1 / side.n2;
        let sin2_t = eta * eta * (1.0 - side.cos_i * side.cos_i);
        if sin2_t > 1.0 {
            return None;
        }
        let cos_t = (1.0 - sin2_t).sqrt();
        let incident = -hit.w_in;
        let w = (eta * incident + (eta * side.cos_i - cos_t) * side.normal).normalize();
        let r = schlick(side.cos_i, side.n1, side.n2);
        Some(ShadingSample::specular(self.ks * (1.0 - r), w, 1.0 - r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Material;

    const GLASS: f32 = 1.5;

    fn hit_with<'a>(material: &'a Material, w_in: Vec3) -> HitRecord<'a> {
        HitRecord::new(1.0, Vec3::ZERO, Vec3::Y, w_in.normalize(), material)
    }

    #[test]
    fn test_schlick_normal_incidence() {
        let r0 = ((1.0 - GLASS) / (1.0 + GLASS)).powi(2);
        assert!((schlick(1.0, 1.0, GLASS) - r0).abs() < 1e-6);
        assert!((schlick(1.0, GLASS, 1.0) - r0).abs() < 1e-6);
    }

    #[test]
    fn test_schlick_increases_toward_grazing() {
        for (n1, n2) in [(1.0, GLASS), (GLASS, 1.0)] {
            let mut previous = schlick(1.0, n1, n2);
            for step in 1..=20 {
                let cos = 1.0 - step as f32 / 20.0;
                let r = schlick(cos, n1, n2);
                assert!(r >= previous - 1e-6, "not monotone at cos={cos} for {n1}->{n2}");
                assert!((0.0..=1.0).contains(&r));
                previous = r;
            }
        }
    }

    #[test]
    fn test_total_internal_reflection() {
        // Critical angle for 1.5 -> 1.0 is about 41.8 degrees
        let cos_i = 60.0_f32.to_radians().cos();
        assert_eq!(schlick(cos_i, GLASS, 1.0), 1.0);

        let material = Material::Refractive(Refractive::new(GLASS, Color::ONE));
        // Arriving from inside: w_in below the outward normal
        let hit = hit_with(&material, Vec3::new(60.0_f32.to_radians().sin(), -cos_i, 0.0));
        assert!(material.evaluate_specular_refraction(&hit).is_none());
        let reflection = material.evaluate_specular_reflection(&hit).unwrap();
        assert!((reflection.p - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lobe_weights_sum_to_one() {
        let material = Material::Refractive(Refractive::new(GLASS, Color::ONE));
        let hit = hit_with(&material, Vec3::new(0.3, 1.0, 0.0));
        let reflection = material.evaluate_specular_reflection(&hit).unwrap();
        let refraction = material.evaluate_specular_refraction(&hit).unwrap();
        assert!((reflection.p + refraction.p - 1.0).abs() < 1e-6);
        assert!(reflection.is_specular && refraction.is_specular);
        assert!(!material.casts_shadows());
    }

    #[test]
    fn test_tint_applies_to_transmission_only() {
        let material = Material::Refractive(Refractive::new(GLASS, Color::splat(0.5)));
        let hit = hit_with(&material, Vec3::new(0.3, 1.0, 0.0));
        let reflection = material.evaluate_specular_reflection(&hit).unwrap();
        let refraction = material.evaluate_specular_refraction(&hit).unwrap();
        assert_eq!(reflection.brdf, Color::splat(reflection.p));
        assert!((refraction.brdf - Color::splat(0.5 * refraction.p)).length() < 1e-6);
    }

    #[test]
    fn test_refraction_bends_toward_normal_when_entering() {
        let material = Material::Refractive(Refractive::new(GLASS, Color::ONE));
        let w_in = Vec3::new(1.0, 1.0, 0.0).normalize();
        let hit = hit_with(&material, w_in);
        let refraction = material.evaluate_specular_refraction(&hit).unwrap();

        // Transmitted ray goes into the surface, on the far side from w_in
        assert!(refraction.w.y < 0.0);
        assert!(refraction.w.x < 0.0);
        assert!((refraction.w.length() - 1.0).abs() < 1e-5);

        // Snell: sin_t = sin_i / 1.5
        let sin_i = w_in.x;
        let sin_t = -refraction.w.x;
        assert!((sin_t - sin_i / GLASS).abs() < 1e-5);
    }

    #[test]
    fn test_normal_incidence_passes_straight_through() {
        let material = Material::Refractive(Refractive::new(GLASS, Color::ONE));
        let hit = hit_with(&material, Vec3::Y);
        let refraction = material.evaluate_specular_refraction(&hit).unwrap();
        assert!((refraction.w - -Vec3::Y).length() < 1e-6);
        let reflection = material.evaluate_specular_reflection(&hit).unwrap();
        assert!((reflection.w - Vec3::Y).length() < 1e-6);
    }
}
