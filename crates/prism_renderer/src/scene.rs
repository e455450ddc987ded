//! A renderable scene: geometry, lights, camera and the algorithms that
//! turn them into pixels.

use crate::{Camera, Color, HitRecord, Integrator, Intersect, Intersectable, IntersectableList, LightSource, Sampler};
use prism_math::{Interval, Ray};

#[derive(Clone, Debug)]
pub struct Scene {
    pub world: IntersectableList,
    pub lights: Vec<LightSource>,
    pub camera: Camera,
    pub integrator: Integrator,
    pub sampler: Sampler,
}

impl Scene {
    /// Empty scene with the Whitted integrator and center sampling.
    pub fn new(camera: Camera) -> Self {
        Self {
            world: IntersectableList::new(),
            lights: Vec::new(),
            camera,
            integrator: Integrator::default(),
            sampler: Sampler::default(),
        }
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn add(&mut self, object: impl Into<Intersectable>) {
        self.world.add(object);
    }

    pub fn add_light(&mut self, light: impl Into<LightSource>) {
        self.lights.push(light.into());
    }

    /// Nearest hit along `ray` with t in (0, ∞).
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.world.intersect(ray, Interval::POSITIVE)
    }

    /// Radiance arriving at the ray origin along `ray`.
    pub fn integrate(&self, ray: &Ray) -> Color {
        self.integrator.integrate(self, ray)
    }
}
