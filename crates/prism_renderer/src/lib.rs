//! prism renderer - Whitted-style CPU ray tracing
//!
//! Direct illumination from point lights, hard shadows, and recursive
//! specular reflection/refraction with Fresnel weighting. Pixels are spread
//! over a fixed pool of workers and merged into per-channel accumulation
//! buffers.
//!
//! Primitives are tested exhaustively; there is no acceleration structure.

mod builder;
mod camera;
mod demo;
mod dielectric;
mod error;
mod film;
mod hit;
mod integrator;
mod intersectable;
mod light;
mod material;
mod mesh;
mod output;
mod partition;
mod plane;
mod renderer;
mod sampler;
mod scene;
mod sphere;
mod triangle;

pub use builder::{BuiltLight, Registry, SceneBuilder};
pub use camera::Camera;
pub use demo::demo_scene_description;
pub use dielectric::{schlick, Refractive};
pub use error::{BuildError, BuildResult, OutputError, OutputResult, RenderError, RenderResult};
pub use film::{Film, PartialFilm, PixelAccumulator, RenderedImage};
pub use hit::{HitRecord, ShadingSample};
pub use integrator::{DebugIntegrator, Integrator, WhittedIntegrator};
pub use intersectable::{Intersect, Intersectable, IntersectableList};
pub use light::{LightSource, PointLight};
pub use material::{Blinn, Brdf, Color, Diffuse, GridTextured, Material, PointLightMaterial, Reflective};
pub use mesh::Mesh;
pub use output::{save_image, to_rgb_image};
pub use partition::{partition_pixels, Partition};
pub use plane::Plane;
pub use renderer::{render, render_partition, render_pixel, Progress, RenderConfig};
pub use sampler::Sampler;
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, Ray, Vec3, Vec3Ext};
