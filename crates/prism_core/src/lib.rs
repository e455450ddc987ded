//! prism core - scene description and geometry loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription` and friends, deserialized from JSON
//! - **Mesh data**: `MeshData`, loaded from Wavefront OBJ files
//!
//! It knows nothing about rendering; `prism_renderer` turns a description
//! into an intersectable scene.
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let description = load_scene("scenes/box.json")?;
//! println!("{} objects, {} lights",
//!     description.objects.len(),
//!     description.lights.len());
//! ```

pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use mesh::{Face, MeshData, MeshError, MeshResult};
pub use scene::{
    load_scene, load_scene_from_str, CameraDescription, IntegratorKind, LightDescription,
    MaterialDescription, MaterialRef, ObjectDescription, SamplerDescription, SamplerKind,
    SceneDescription, SceneError, SceneResult, SettingsDescription,
};
