//! Light transport.

use crate::{Brdf, Color, HitRecord, Scene, ShadingSample};
use prism_core::IntegratorKind;
use prism_math::{Ray, Vec3};

/// Computes the radiance carried by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Integrator {
    Whitted(WhittedIntegrator),
    Debug(DebugIntegrator),
}

impl Integrator {
    pub fn integrate(&self, scene: &Scene, ray: &Ray) -> Color {
        match self {
            Integrator::Whitted(whitted) => whitted.integrate(scene, ray),
            Integrator::Debug(debug) => debug.integrate(scene, ray),
        }
    }

    pub fn from_kind(kind: IntegratorKind, max_bounces: u32) -> Self {
        match kind {
            IntegratorKind::Whitted => Integrator::Whitted(WhittedIntegrator::new(max_bounces)),
            IntegratorKind::Debug => Integrator::Debug(DebugIntegrator),
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Integrator::Whitted(WhittedIntegrator::default())
    }
}

/// Shades hits by their surface normal, `0.5 * (n + 1)`; misses are black.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DebugIntegrator;

impl DebugIntegrator {
    pub fn integrate(&self, scene: &Scene, ray: &Ray) -> Color {
        match scene.intersect(ray) {
            Some(hit) => 0.5 * (hit.normal + Vec3::ONE),
            None => Color::ZERO,
        }
    }
}

/// Direct lighting from every light with hard shadows, plus recursive
/// specular reflection and refraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WhittedIntegrator {
    pub max_bounces: u32,
}

impl WhittedIntegrator {
    pub const DEFAULT_MAX_BOUNCES: u32 = 5;

    pub fn new(max_bounces: u32) -> Self {
        Self { max_bounces }
    }

    pub fn integrate(&self, scene: &Scene, ray: &Ray) -> Color {
        let Some(hit) = scene.intersect(ray) else {
            return Color::ZERO;
        };

        let emission = hit.material.evaluate_emission(&hit, hit.w_in);
        if emission != Color::ZERO {
            return emission;
        }

        let material = hit.material;
        if material.has_specular_reflection() || material.has_specular_refraction() {
            if ray.bounces >= self.max_bounces {
                return Color::ZERO;
            }
            let reflection = material
                .evaluate_specular_reflection(&hit)
                .map_or(Color::ZERO, |sample| self.follow(scene, &hit, ray, &sample));
            let refraction = material
                .evaluate_specular_refraction(&hit)
                .map_or(Color::ZERO, |sample| self.follow(scene, &hit, ray, &sample));
            return reflection + refraction;
        }

        scene
            .lights
            .iter()
            .map(|light| self.direct_lighting(scene, &hit, &light.sample()))
            .sum()
    }

    /// Radiance along a specular lobe, weighted by its BRDF.
    fn follow(&self, scene: &Scene, hit: &HitRecord, ray: &Ray, sample: &ShadingSample) -> Color {
        let bounced = Ray::secondary(hit.position, sample.w, ray.bounces + 1);
        sample.brdf * self.integrate(scene, &bounced)
    }

    /// Unoccluded contribution of one light sample at `hit`.
    fn direct_lighting(&self, scene: &Scene, hit: &HitRecord, light: &HitRecord) -> Color {
        let to_light = light.position - hit.position;
        let distance = to_light.length();
        if distance == 0.0 {
            return Color::ZERO;
        }
        let l = to_light / distance;

        // Point lights carry a zero normal: they face every direction.
        let light_cosine = if light.normal == Vec3::ZERO {
            1.0
        } else {
            light.normal.dot(-l).max(0.0)
        };
        let surface_cosine = hit.normal.dot(l).max(0.0);
        if light_cosine == 0.0 || surface_cosine == 0.0 {
            return Color::ZERO;
        }

        if Self::is_occluded(scene, hit.position, l, distance) {
            return Color::ZERO;
        }

        let emission = light.material.evaluate_emission(light, -l);
        let brdf = hit.material.evaluate_brdf(hit, hit.w_in, l);
        brdf * emission * surface_cosine * light_cosine / (distance * distance)
    }

    /// Whether a shadow-casting surface lies between `from` and a light
    /// `distance` away along the unit direction `direction`.
    ///
    /// Surfaces that do not cast shadows are stepped through.
    pub fn is_occluded(scene: &Scene, from: Vec3, direction: Vec3, distance: f32) -> bool {
        let mut origin = from;
        let mut remaining = distance;
        loop {
            let shadow_ray = Ray::secondary(origin, direction, 0);
            let Some(blocker) = scene.intersect(&shadow_ray) else {
                return false;
            };
            // The secondary ray starts slightly ahead of `origin`.
            let travelled = (blocker.position - origin).length();
            if travelled >= remaining {
                return false;
            }
            if blocker.material.casts_shadows() {
                return true;
            }
            origin = blocker.position;
            remaining -= travelled;
        }
    }
}

impl Default for WhittedIntegrator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_BOUNCES)
    }
}
