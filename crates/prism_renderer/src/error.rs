//! Error types for scene building, rendering and image output.

use std::path::PathBuf;

use prism_core::{MeshError, SceneError};
use thiserror::Error;

/// Errors raised while turning a scene description into a [`crate::Scene`].
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Unknown material type: {0}")]
    UnknownMaterialType(String),

    #[error("Unknown light type: {0}")]
    UnknownLightType(String),

    #[error("Invalid parameters for '{tag}': {source}")]
    InvalidParameters {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load mesh {path}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshError,
    },
}

/// Result type for scene building.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised by the parallel renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while writing the rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image buffer size mismatch for {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// Result type for image output.
pub type OutputResult<T> = Result<T, OutputError>;
