//! Surface materials.
//!
//! Every material answers the same questions: how much light it reflects
//! between two directions, how much it emits, and whether it has a perfect
//! mirror or refraction lobe the integrator should follow.

use std::f32::consts::PI;

use crate::{HitRecord, Refractive, ShadingSample};
use prism_math::{Vec3, Vec3Ext};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Reflectance model of a surface.
pub trait Brdf {
    /// Reflected fraction for light arriving from `w_in` and leaving along `w_out`.
    ///
    /// Both directions point away from the surface.
    fn evaluate_brdf(&self, hit: &HitRecord, w_out: Vec3, w_in: Vec3) -> Color;

    /// Light emitted from the surface toward `w_out`.
    fn evaluate_emission(&self, _hit: &HitRecord, _w_out: Vec3) -> Color {
        Color::ZERO
    }

    fn has_specular_reflection(&self) -> bool {
        false
    }

    fn has_specular_refraction(&self) -> bool {
        false
    }

    /// Whether the surface blocks shadow rays.
    fn casts_shadows(&self) -> bool {
        true
    }

    fn evaluate_specular_reflection(&self, _hit: &HitRecord) -> Option<ShadingSample> {
        None
    }

    fn evaluate_specular_refraction(&self, _hit: &HitRecord) -> Option<ShadingSample> {
        None
    }
}

/// The closed set of materials a scene can use.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Diffuse(Diffuse),
    Blinn(Blinn),
    Reflective(Reflective),
    Refractive(Refractive),
    GridTextured(GridTextured),
    PointLight(PointLightMaterial),
}

impl Material {
    fn as_brdf(&self) -> &dyn Brdf {
        match self {
            Material::Diffuse(m) => m,
            Material::Blinn(m) => m,
            Material::Reflective(m) => m,
            Material::Refractive(m) => m,
            Material::GridTextured(m) => m,
            Material::PointLight(m) => m,
        }
    }
}

impl Brdf for Material {
    fn evaluate_brdf(&self, hit: &HitRecord, w_out: Vec3, w_in: Vec3) -> Color {
        self.as_brdf().evaluate_brdf(hit, w_out, w_in)
    }

    fn evaluate_emission(&self, hit: &HitRecord, w_out: Vec3) -> Color {
        self.as_brdf().evaluate_emission(hit, w_out)
    }

    fn has_specular_reflection(&self) -> bool {
        self.as_brdf().has_specular_reflection()
    }

    fn has_specular_refraction(&self) -> bool {
        self.as_brdf().has_specular_refraction()
    }

    fn casts_shadows(&self) -> bool {
        self.as_brdf().casts_shadows()
    }

    fn evaluate_specular_reflection(&self, hit: &HitRecord) -> Option<ShadingSample> {
        self.as_brdf().evaluate_specular_reflection(hit)
    }

    fn evaluate_specular_refraction(&self, hit: &HitRecord) -> Option<ShadingSample> {
        self.as_brdf().evaluate_specular_refraction(hit)
    }
}

/// Lambertian reflector: constant `color / π` in every direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Diffuse {
    brdf: Color,
    casts_shadows: bool,
}

impl Diffuse {
    pub fn new(color: Color) -> Self {
        Self {
            brdf: color / PI,
            casts_shadows: true,
        }
    }

    /// A diffuse surface that shadow rays pass through (light markers).
    pub fn without_shadows(color: Color) -> Self {
        Self {
            casts_shadows: false,
            ..Self::new(color)
        }
    }

    /// The reflectance this material was created with.
    pub fn color(&self) -> Color {
        self.brdf * PI
    }
}

impl Brdf for Diffuse {
    fn evaluate_brdf(&self, _hit: &HitRecord, _w_out: Vec3, _w_in: Vec3) -> Color {
        self.brdf
    }

    fn casts_shadows(&self) -> bool {
        self.casts_shadows
    }
}

/// Blinn-Phong: diffuse plus a half-vector specular highlight.
#[derive(Clone, Debug, PartialEq)]
pub struct Blinn {
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
}

impl Blinn {
    pub fn new(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }
}

impl Brdf for Blinn {
    fn evaluate_brdf(&self, hit: &HitRecord, w_out: Vec3, w_in: Vec3) -> Color {
        // Opposite directions have no half vector; the highlight vanishes.
        let half = (w_in + w_out).normalize_or_zero();
        let lambert = w_in.dot(hit.normal).max(0.0);
        let highlight = half.dot(hit.normal).max(0.0).powf(self.shininess);
        self.diffuse + self.diffuse * lambert + self.specular * highlight
    }
}

/// Perfect mirror.
#[derive(Clone, Debug, PartialEq)]
pub struct Reflective {
    pub ks: Color,
}

impl Reflective {
    pub fn new(ks: Color) -> Self {
        Self { ks }
    }
}

impl Brdf for Reflective {
    fn evaluate_brdf(&self, _hit: &HitRecord, _w_out: Vec3, _w_in: Vec3) -> Color {
        Color::ZERO
    }

    fn has_specular_reflection(&self) -> bool {
        true
    }

    fn evaluate_specular_reflection(&self, hit: &HitRecord) -> Option<ShadingSample> {
        let w = hit.w_in.reflected_on(hit.normal);
        Some(ShadingSample::specular(self.ks, w, 1.0))
    }
}

/// Diffuse surface modulated by a world-space grid of lines.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTextured {
    pub line_color: Color,
    pub tile_color: Color,
    pub thickness: f32,
    pub shift: Vec3,
    pub scale: f32,
    inner: Diffuse,
}

impl GridTextured {
    pub fn new(line_color: Color, tile_color: Color, thickness: f32, shift: Vec3, scale: f32) -> Self {
        Self {
            line_color,
            tile_color,
            thickness,
            shift,
            scale,
            inner: Diffuse::new(Color::ONE),
        }
    }

    /// True when `position` falls on a grid line.
    pub fn on_line(&self, position: Vec3) -> bool {
        let p = (position + self.shift) / self.scale;
        let distance = (p - p.round()).abs();
        distance.min_element() < self.thickness / self.scale
    }

    fn texture(&self, position: Vec3) -> Color {
        if self.on_line(position) {
            self.line_color
        } else {
            self.tile_color
        }
    }
}

impl Brdf for GridTextured {
    fn evaluate_brdf(&self, hit: &HitRecord, w_out: Vec3, w_in: Vec3) -> Color {
        self.inner.evaluate_brdf(hit, w_out, w_in) * self.texture(hit.position)
    }

    fn casts_shadows(&self) -> bool {
        self.inner.casts_shadows()
    }
}

/// Material attached to point lights; its only property is emission.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLightMaterial {
    pub emission: Color,
}

impl PointLightMaterial {
    pub fn new(emission: Color) -> Self {
        Self { emission }
    }
}

impl Brdf for PointLightMaterial {
    fn evaluate_brdf(&self, _hit: &HitRecord, _w_out: Vec3, _w_in: Vec3) -> Color {
        Color::ZERO
    }

    fn evaluate_emission(&self, _hit: &HitRecord, _w_out: Vec3) -> Color {
        self.emission
    }

    fn casts_shadows(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_at<'a>(material: &'a Material, position: Vec3, normal: Vec3, w_in: Vec3) -> HitRecord<'a> {
        HitRecord::new(1.0, position, normal, w_in, material)
    }

    #[test]
    fn test_diffuse_brdf_is_color_over_pi() {
        let material = Material::Diffuse(Diffuse::new(Color::new(0.5, 0.25, 1.0)));
        let hit = hit_at(&material, Vec3::ZERO, Vec3::Y, Vec3::Y);
        let brdf = material.evaluate_brdf(&hit, Vec3::Y, Vec3::X);
        assert!((brdf - Color::new(0.5, 0.25, 1.0) / PI).length() < 1e-6);
        assert!(material.casts_shadows());
        assert!(!material.has_specular_reflection());
        assert!(material.evaluate_specular_reflection(&hit).is_none());
        assert_eq!(material.evaluate_emission(&hit, Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_diffuse_without_shadows() {
        let diffuse = Diffuse::without_shadows(Color::ONE);
        assert!(!diffuse.casts_shadows());
        assert!((diffuse.color() - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_blinn_highlight_peaks_at_mirror_direction() {
        let material = Material::Blinn(Blinn::new(Color::ZERO, Color::ONE, 32.0));
        let hit = hit_at(&material, Vec3::ZERO, Vec3::Y, Vec3::Y);
        let w_in = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let off = Vec3::new(1.0, 1.0, 0.0).normalize();
        let peak = material.evaluate_brdf(&hit, mirror, w_in);
        let side = material.evaluate_brdf(&hit, off, w_in);
        assert!((peak.x - 1.0).abs() < 1e-5);
        assert!(side.x < peak.x);
    }

    #[test]
    fn test_blinn_opposite_directions_have_no_highlight() {
        let blinn = Blinn::new(Color::splat(0.1), Color::ONE, 8.0);
        let material = Material::Blinn(blinn);
        let hit = hit_at(&material, Vec3::ZERO, Vec3::Y, Vec3::Y);
        let brdf = material.evaluate_brdf(&hit, Vec3::X, -Vec3::X);
        assert!((brdf - Color::splat(0.1)).length() < 1e-6);
    }

    #[test]
    fn test_mirror_reflects_about_normal() {
        let material = Material::Reflective(Reflective::new(Color::splat(0.9)));
        let w_in = Vec3::new(1.0, 1.0, 0.0).normalize();
        let hit = hit_at(&material, Vec3::ZERO, Vec3::Y, w_in);
        let sample = material.evaluate_specular_reflection(&hit).unwrap();
        assert!((sample.w - Vec3::new(-1.0, 1.0, 0.0).normalize()).length() < 1e-6);
        assert_eq!(sample.brdf, Color::splat(0.9));
        assert!(sample.is_specular);
        assert_eq!(sample.p, 1.0);
        assert!(material.evaluate_specular_refraction(&hit).is_none());
        assert_eq!(material.evaluate_brdf(&hit, Vec3::Y, Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_grid_lines_and_tiles() {
        let grid = GridTextured::new(Color::ZERO, Color::ONE, 0.05, Vec3::ZERO, 1.0);
        assert!(grid.on_line(Vec3::new(2.01, 0.5, 0.5)));
        assert!(!grid.on_line(Vec3::new(0.5, 0.5, 0.5)));

        let material = Material::GridTextured(grid);
        let hit = hit_at(&material, Vec3::new(0.5, 0.5, 0.5), Vec3::Y, Vec3::Y);
        assert!((material.evaluate_brdf(&hit, Vec3::Y, Vec3::Y) - Color::splat(1.0 / PI)).length() < 1e-6);
        let on_line = hit_at(&material, Vec3::new(3.0, 0.5, 0.5), Vec3::Y, Vec3::Y);
        assert_eq!(material.evaluate_brdf(&on_line, Vec3::Y, Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_grid_shift_and_scale() {
        let grid = GridTextured::new(Color::ZERO, Color::ONE, 0.1, Vec3::splat(0.5), 2.0);
        // (1.5 + 0.5) / 2 = 1.0 lands exactly on a line
        assert!(grid.on_line(Vec3::new(1.5, 0.3, 0.3)));
        assert!(!grid.on_line(Vec3::new(0.5, 0.3, 0.3)));
    }

    #[test]
    fn test_point_light_material() {
        let material = Material::PointLight(PointLightMaterial::new(Color::splat(10.0)));
        let hit = HitRecord::light_sample(Vec3::ZERO, &material);
        assert_eq!(material.evaluate_emission(&hit, Vec3::Y), Color::splat(10.0));
        assert!(!material.casts_shadows());
    }
}
