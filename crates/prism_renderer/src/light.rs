//! Light sources.

use crate::{Color, HitRecord, Material, PointLightMaterial};
use prism_math::Vec3;

/// An isotropic point light.
#[derive(Clone, Debug)]
pub struct PointLight {
    position: Vec3,
    material: Material,
}

impl PointLight {
    pub fn new(position: Vec3, emission: Color) -> Self {
        Self {
            position,
            material: Material::PointLight(PointLightMaterial::new(emission)),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn emission(&self) -> Color {
        match &self.material {
            Material::PointLight(light) => light.emission,
            _ => Color::ZERO,
        }
    }

    /// The light's only point, carrying its emissive material.
    pub fn sample(&self) -> HitRecord<'_> {
        HitRecord::light_sample(self.position, &self.material)
    }
}

/// The closed set of light sources.
#[derive(Clone, Debug)]
pub enum LightSource {
    Point(PointLight),
}

impl LightSource {
    /// Sample a point on the light.
    pub fn sample(&self) -> HitRecord<'_> {
        match self {
            LightSource::Point(light) => light.sample(),
        }
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Brdf;

    #[test]
    fn test_point_light_sample() {
        let light = LightSource::from(PointLight::new(Vec3::new(1.0, 2.0, 3.0), Color::splat(5.0)));
        let sample = light.sample();
        assert_eq!(sample.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sample.normal, Vec3::ZERO);
        assert!(sample.primitive.is_none());
        assert_eq!(sample.material.evaluate_emission(&sample, Vec3::Y), Color::splat(5.0));
        assert!(!sample.material.casts_shadows());
    }
}
