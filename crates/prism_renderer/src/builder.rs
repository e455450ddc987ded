//! Building renderable scenes from scene descriptions.
//!
//! Materials and lights are created through a [`Registry`] that maps the
//! `type` tag written in the scene file to a constructor. The built-in tags
//! are registered by [`SceneBuilder::new`]; callers can register more.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, info};
use prism_core::{MaterialDescription, MaterialRef, MeshData, ObjectDescription, SceneDescription, SceneError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    Blinn, BuildError, BuildResult, Camera, Color, Diffuse, GridTextured, Integrator, Intersectable, LightSource,
    Material, Mesh, Plane, PointLight, PointLightMaterial, Reflective, Refractive, Sampler, Scene, Sphere, Triangle,
};
use prism_math::Vec3;

type Constructor<T> = Box<dyn Fn(&Map<String, Value>) -> BuildResult<T> + Send + Sync>;

/// Maps type tags to constructors.
pub struct Registry<T> {
    constructors: HashMap<String, Constructor<T>>,
    unknown: fn(String) -> BuildError,
}

impl<T: 'static> Registry<T> {
    /// An empty registry; `unknown` builds the error for unregistered tags.
    pub fn new(unknown: fn(String) -> BuildError) -> Self {
        Self {
            constructors: HashMap::new(),
            unknown,
        }
    }

    /// Register a constructor, replacing any previous one for `tag`.
    pub fn register<F>(&mut self, tag: impl Into<String>, constructor: F)
    where
        F: Fn(&Map<String, Value>) -> BuildResult<T> + Send + Sync + 'static,
    {
        self.constructors.insert(tag.into(), Box::new(constructor));
    }

    /// Register a constructor that reads its parameters into `P` first.
    pub fn register_with<P, F>(&mut self, tag: &str, constructor: F)
    where
        P: DeserializeOwned + 'static,
        F: Fn(P) -> T + Send + Sync + 'static,
    {
        let owned = tag.to_string();
        self.register(tag, move |params| Ok(constructor(parse_params(&owned, params)?)));
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Run the constructor registered for `tag`.
    pub fn create(&self, tag: &str, params: &Map<String, Value>) -> BuildResult<T> {
        let constructor = self.constructors.get(tag).ok_or_else(|| (self.unknown)(tag.to_string()))?;
        constructor(params)
    }
}

fn parse_params<P: DeserializeOwned>(tag: &str, params: &Map<String, Value>) -> BuildResult<P> {
    serde_json::from_value(Value::Object(params.clone())).map_err(|source| BuildError::InvalidParameters {
        tag: tag.to_string(),
        source,
    })
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

fn yes() -> bool {
    true
}

fn one() -> [f32; 3] {
    [1.0; 3]
}

fn gray() -> [f32; 3] {
    [0.5; 3]
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DiffuseParams {
    #[serde(default = "gray")]
    color: [f32; 3],
    #[serde(default = "yes")]
    casts_shadows: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BlinnParams {
    #[serde(default = "gray")]
    diffuse: [f32; 3],
    #[serde(default = "one")]
    specular: [f32; 3],
    #[serde(default = "BlinnParams::default_shininess")]
    shininess: f32,
}

impl BlinnParams {
    fn default_shininess() -> f32 {
        32.0
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MirrorParams {
    #[serde(default = "one")]
    ks: [f32; 3],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GlassParams {
    #[serde(default = "GlassParams::default_ior")]
    ior: f32,
    #[serde(default = "one")]
    ks: [f32; 3],
}

impl GlassParams {
    fn default_ior() -> f32 {
        1.5
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GridParams {
    #[serde(default)]
    line_color: [f32; 3],
    #[serde(default = "one")]
    tile_color: [f32; 3],
    #[serde(default = "GridParams::default_thickness")]
    thickness: f32,
    #[serde(default)]
    shift: [f32; 3],
    #[serde(default = "GridParams::default_scale")]
    scale: f32,
}

impl GridParams {
    fn default_thickness() -> f32 {
        0.02
    }

    fn default_scale() -> f32 {
        1.0
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmissionParams {
    #[serde(default = "one")]
    emission: [f32; 3],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PointLightParams {
    position: [f32; 3],
    #[serde(default = "one")]
    emission: [f32; 3],
    #[serde(default)]
    marker_radius: Option<f32>,
}

/// A light plus the optional geometry that shows where it is.
#[derive(Clone, Debug)]
pub struct BuiltLight {
    pub light: LightSource,
    pub marker: Option<Intersectable>,
}

/// Turns [`SceneDescription`]s into [`Scene`]s.
pub struct SceneBuilder {
    pub materials: Registry<Material>,
    pub lights: Registry<BuiltLight>,
}

impl SceneBuilder {
    /// A builder with every built-in material and light tag registered.
    pub fn new() -> Self {
        let mut materials = Registry::new(BuildError::UnknownMaterialType);
        materials.register_with("diffuse", |p: DiffuseParams| {
            let diffuse = if p.casts_shadows {
                Diffuse::new(vec3(p.color))
            } else {
                Diffuse::without_shadows(vec3(p.color))
            };
            Material::Diffuse(diffuse)
        });
        materials.register_with("blinn", |p: BlinnParams| {
            Material::Blinn(Blinn::new(vec3(p.diffuse), vec3(p.specular), p.shininess))
        });
        materials.register_with("mirror", |p: MirrorParams| Material::Reflective(Reflective::new(vec3(p.ks))));
        materials.register_with("glass", |p: GlassParams| Material::Refractive(Refractive::new(p.ior, vec3(p.ks))));
        materials.register_with("grid", |p: GridParams| {
            Material::GridTextured(GridTextured::new(
                vec3(p.line_color),
                vec3(p.tile_color),
                p.thickness,
                vec3(p.shift),
                p.scale,
            ))
        });
        materials.register_with("light", |p: EmissionParams| {
            Material::PointLight(PointLightMaterial::new(vec3(p.emission)))
        });

        let mut lights = Registry::new(BuildError::UnknownLightType);
        lights.register_with("point", |p: PointLightParams| {
            let position = vec3(p.position);
            let emission = vec3(p.emission);
            let marker = p.marker_radius.filter(|r| *r > 0.0).map(|radius| {
                let material = Material::Diffuse(Diffuse::without_shadows(emission.clamp(Color::ZERO, Color::ONE)));
                Intersectable::Sphere(Sphere::new(position, radius, Arc::new(material)))
            });
            BuiltLight {
                light: LightSource::Point(PointLight::new(position, emission)),
                marker,
            }
        });

        Self { materials, lights }
    }

    pub fn build_material(&self, description: &MaterialDescription) -> BuildResult<Material> {
        self.materials.create(&description.kind, &description.params)
    }

    /// Validate the description and build the scene it describes.
    pub fn build(&self, description: &SceneDescription) -> BuildResult<Scene> {
        description.validate()?;
        let settings = &description.settings;

        let camera = Camera::new()
            .with_resolution(settings.width, settings.height)
            .with_position(
                vec3(description.camera.eye),
                vec3(description.camera.look_at),
                vec3(description.camera.up),
            )
            .with_fov(description.camera.fov);

        let mut scene = Scene::new(camera)
            .with_integrator(Integrator::from_kind(settings.integrator, settings.max_bounces))
            .with_sampler(Sampler::from(&settings.sampler));

        // Named materials are built once and shared by every object using them.
        let mut named = BTreeMap::new();
        for (name, material) in &description.materials {
            named.insert(name.as_str(), Arc::new(self.build_material(material)?));
        }

        for object in &description.objects {
            let material = match object.material() {
                MaterialRef::Named(name) => named
                    .get(name.as_str())
                    .cloned()
                    .ok_or_else(|| SceneError::UnknownMaterial(name.clone()))?,
                MaterialRef::Inline(inline) => Arc::new(self.build_material(inline)?),
            };
            scene.add(self.build_object(description, object, material)?);
        }

        for light in &description.lights {
            let built = self.lights.create(&light.kind, &light.params)?;
            if let Some(marker) = built.marker {
                scene.add(marker);
            }
            scene.add_light(built.light);
        }

        info!(
            "Built scene: {} objects, {} lights, {}x{}",
            scene.world.len(),
            scene.lights.len(),
            settings.width,
            settings.height
        );
        Ok(scene)
    }

    fn build_object(
        &self,
        description: &SceneDescription,
        object: &ObjectDescription,
        material: Arc<Material>,
    ) -> BuildResult<Intersectable> {
        let object: Intersectable = match object {
            ObjectDescription::Sphere { center, radius, .. } => Sphere::new(vec3(*center), *radius, material).into(),
            ObjectDescription::Plane { normal, distance, .. } => Plane::new(vec3(*normal), *distance, material).into(),
            ObjectDescription::Triangle { a, b, c, normals, .. } => match normals {
                Some(normals) => {
                    Triangle::with_vertex_normals(vec3(*a), vec3(*b), vec3(*c), normals.map(vec3), material).into()
                }
                None => Triangle::new(vec3(*a), vec3(*b), vec3(*c), material).into(),
            },
            ObjectDescription::Mesh { path, .. } => {
                let path = description.resolve_path(path);
                let data = MeshData::load_obj(&path).map_err(|source| BuildError::Mesh {
                    path: path.clone(),
                    source,
                })?;
                let mesh = Mesh::from_data(&data, material);
                debug!("Mesh {}: {} triangles", path.display(), mesh.triangle_count());
                mesh.into()
            }
        };
        Ok(object)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
