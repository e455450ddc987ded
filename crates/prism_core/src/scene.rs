//! Scene description types for prism.
//!
//! A scene description is the plain-data form of a scene as it appears in a
//! JSON scene file. Materials and lights are kept as a type tag plus free-form
//! parameters: the renderer's registry decides which tags exist and how their
//! parameters are read.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::mesh::is_degenerate;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material reference: {0}")]
    UnknownMaterial(String),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Which light transport algorithm renders the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
    /// Direct lighting plus recursive specular reflection/refraction
    #[default]
    Whitted,
    /// Surface normals mapped to colors
    Debug,
}

/// How sub-pixel sample positions are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplerKind {
    /// Every sample at the pixel center
    #[default]
    Center,
    /// Uniform random samples, seeded per pixel
    Random,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerDescription {
    #[serde(default)]
    pub kind: SamplerKind,
    #[serde(default)]
    pub seed: u64,
}

/// Image and quality settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDescription {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_bounces: u32,
    /// Worker count; `None` uses the available parallelism
    pub workers: Option<usize>,
    pub integrator: IntegratorKind,
    pub sampler: SamplerDescription,
}

impl Default for SettingsDescription {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples_per_pixel: 1,
            max_bounces: 5,
            workers: None,
            integrator: IntegratorKind::Whitted,
            sampler: SamplerDescription::default(),
        }
    }
}

/// Pinhole camera placement. The aspect ratio comes from the image size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub eye: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 5.0],
            look_at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 60.0,
        }
    }
}

/// A material as written in the scene file: `{"type": "diffuse", "color": [..]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl MaterialDescription {
    /// Create a description from a tag and a JSON object of parameters.
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            kind: kind.into(),
            params,
        }
    }
}

/// An object's material: a name from the scene's material table or an inline definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Named(String),
    Inline(MaterialDescription),
}

/// A light as written in the scene file: `{"type": "point", "position": [..], ..}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl LightDescription {
    /// Create a description from a tag and a JSON object of parameters.
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            kind: kind.into(),
            params,
        }
    }
}

/// Geometry placed in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: MaterialRef,
    },
    /// Plane `normal·x + distance = 0`
    Plane {
        normal: [f32; 3],
        distance: f32,
        material: MaterialRef,
    },
    Triangle {
        a: [f32; 3],
        b: [f32; 3],
        c: [f32; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        normals: Option<[[f32; 3]; 3]>,
        material: MaterialRef,
    },
    Mesh {
        path: PathBuf,
        material: MaterialRef,
    },
}

impl ObjectDescription {
    pub fn material(&self) -> &MaterialRef {
        match self {
            Self::Sphere { material, .. }
            | Self::Plane { material, .. }
            | Self::Triangle { material, .. }
            | Self::Mesh { material, .. } => material,
        }
    }
}

/// A complete scene file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub settings: SettingsDescription,

    #[serde(default)]
    pub camera: CameraDescription,

    /// Named materials that objects may refer to
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,

    #[serde(default)]
    pub objects: Vec<ObjectDescription>,

    #[serde(default)]
    pub lights: Vec<LightDescription>,

    /// Directory relative mesh paths resolve against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SceneDescription {
    /// Look up the material an object refers to.
    pub fn resolve_material<'a>(
        &'a self,
        material: &'a MaterialRef,
    ) -> SceneResult<&'a MaterialDescription> {
        match material {
            MaterialRef::Inline(description) => Ok(description),
            MaterialRef::Named(name) => self
                .materials
                .get(name)
                .ok_or_else(|| SceneError::UnknownMaterial(name.clone())),
        }
    }

    /// Resolve a path from the scene file against the scene's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Check the values serde cannot check by itself.
    pub fn validate(&self) -> SceneResult<()> {
        let settings = &self.settings;
        if settings.width == 0 || settings.height == 0 {
            return Err(SceneError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                settings.width, settings.height
            )));
        }
        if settings.workers == Some(0) {
            return Err(SceneError::Invalid("worker count must be at least 1".into()));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(SceneError::Invalid(format!(
                "field of view must be within (0, 180) degrees, got {}",
                self.camera.fov
            )));
        }
        let view = Vec3::from_array(self.camera.eye) - Vec3::from_array(self.camera.look_at);
        if is_degenerate(view) {
            return Err(SceneError::Invalid("camera eye and look_at coincide".into()));
        }
        if is_degenerate(Vec3::from_array(self.camera.up).cross(view.normalize())) {
            return Err(SceneError::Invalid("camera up is parallel to the view direction".into()));
        }

        for (index, object) in self.objects.iter().enumerate() {
            self.resolve_material(object.material())?;
            match object {
                ObjectDescription::Sphere { radius, .. } if *radius <= 0.0 => {
                    return Err(SceneError::Invalid(format!(
                        "object {}: sphere radius must be positive, got {}",
                        index, radius
                    )));
                }
                ObjectDescription::Plane { normal, .. } if is_degenerate(Vec3::from_array(*normal)) => {
                    return Err(SceneError::Invalid(format!(
                        "object {}: plane normal must be non-zero",
                        index
                    )));
                }
                ObjectDescription::Triangle { a, b, c, .. } => {
                    let [a, b, c] = [*a, *b, *c].map(Vec3::from_array);
                    if is_degenerate(b - a) || is_degenerate((b - a).cross(c - a)) {
                        return Err(SceneError::Invalid(format!(
                            "object {}: triangle is degenerate",
                            index
                        )));
                    }
                }
                _ => {}
            }
        }

        if settings.samples_per_pixel == 0 {
            log::warn!("samples_per_pixel is 0, the image will be black");
        }
        if self.lights.is_empty() {
            log::warn!("Scene has no lights");
        }

        Ok(())
    }
}

/// Load and validate a JSON scene file.
///
/// Relative mesh paths inside the file resolve against the file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let mut description = load_scene_from_str(&source)?;
    description.base_dir = path.parent().map(Path::to_path_buf);

    log::info!(
        "Loaded scene {:?}: {} objects, {} lights, {} named materials",
        path,
        description.objects.len(),
        description.lights.len(),
        description.materials.len()
    );

    Ok(description)
}

/// Parse and validate a JSON scene held in memory.
pub fn load_scene_from_str(source: &str) -> SceneResult<SceneDescription> {
    let description: SceneDescription = serde_json::from_str(source)?;
    description.validate()?;
    Ok(description)
}
