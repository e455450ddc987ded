//! Triangle mesh data for prism scenes.
//!
//! Meshes are loaded from Wavefront OBJ files (triangulated on load) and
//! handed to the renderer as a flat face list. The renderer decides how to
//! turn faces into intersectable triangles.

use std::io::BufReader;
use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading mesh geometry.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No triangles found in mesh {0}")]
    Empty(String),
}

pub type MeshResult<T> = Result<T, MeshError>;

/// One triangle of a mesh, with optional per-vertex normals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub positions: [Vec3; 3],
    pub normals: Option<[Vec3; 3]>,
}

/// A mesh consisting of vertex positions, optional normals, and triangle indices.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals, parallel to `positions` when present
    pub normals: Option<Vec<Vec3>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a new mesh from positions and indices, optionally with normals.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Load every model of an OBJ file into one mesh.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading OBJ mesh from {:?}", path);

        let (models, _materials) = tobj::load_obj(path, &Self::load_options())?;
        Self::from_models(&models, &path.display().to_string())
    }

    /// Parse OBJ source text held in memory.
    pub fn from_obj_str(source: &str) -> MeshResult<Self> {
        let mut reader = BufReader::new(source.as_bytes());
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_models(&models, "<memory>")
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        }
    }

    fn from_models(models: &[tobj::Model], name: &str) -> MeshResult<Self> {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        // Normals are only kept if every model provides them
        let mut all_have_normals = true;

        for model in models {
            let mesh = &model.mesh;
            let offset = positions.len() as u32;

            positions.extend(mesh.positions.chunks_exact(3).map(Vec3::from_slice));
            if mesh.normals.len() == mesh.positions.len() {
                normals.extend(mesh.normals.chunks_exact(3).map(Vec3::from_slice));
            } else {
                all_have_normals = false;
            }
            indices.extend(mesh.indices.iter().map(|i| i + offset));
        }

        if indices.len() < 3 {
            return Err(MeshError::Empty(name.to_string()));
        }

        let normals = (all_have_normals && !normals.is_empty()).then_some(normals);
        let mesh = Self::new(positions, indices, normals);

        log::info!(
            "Loaded mesh {}: {} vertices, {} triangles, normals: {}",
            name,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.has_normals()
        );

        Ok(mesh)
    }

    /// Check if the mesh has per-vertex normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Collect the mesh faces.
    ///
    /// Faces with out-of-range indices or zero area are skipped with a warning,
    /// so every returned face has a well-defined geometric normal.
    pub fn faces(&self) -> Vec<Face> {
        let mut faces = Vec::with_capacity(self.triangle_count());

        for chunk in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];

            if i0 >= self.positions.len() || i1 >= self.positions.len() || i2 >= self.positions.len()
            {
                log::warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0,
                    i1,
                    i2,
                    self.positions.len()
                );
                continue;
            }

            let positions = [self.positions[i0], self.positions[i1], self.positions[i2]];
            let area = (positions[1] - positions[0]).cross(positions[2] - positions[0]);
            if is_degenerate(area) {
                log::warn!("Skipping degenerate triangle [{}, {}, {}]", i0, i1, i2);
                continue;
            }

            let normals = self
                .normals
                .as_ref()
                .map(|n| [n[i0], n[i1], n[i2]])
                .filter(|n| n.iter().all(|v| v.length_squared() > 0.0));

            faces.push(Face { positions, normals });
        }

        faces
    }
}

/// True when `v` is too short (or too long) to normalize reliably in f32.
pub(crate) fn is_degenerate(v: Vec3) -> bool {
    let length_squared = v.length_squared();
    !(length_squared.is_finite() && length_squared > f32::EPSILON * f32::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    const SMOOTH_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vn 0 0 1
vn 0 0 1
f 1//1 2//2 3//3
";

    #[test]
    fn test_mesh_creation() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mesh = MeshData::new(positions, vec![0, 1, 2], None);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_quad_is_triangulated() {
        let mesh = MeshData::from_obj_str(QUAD_OBJ).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.has_normals());
        assert_eq!(mesh.faces().len(), 2);
    }

    #[test]
    fn test_vertex_normals_are_kept() {
        let mesh = MeshData::from_obj_str(SMOOTH_OBJ).unwrap();
        let faces = mesh.faces();

        assert!(mesh.has_normals());
        assert_eq!(faces.len(), 1);
        let normals = faces[0].normals.unwrap();
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_empty_obj_is_error() {
        let result = MeshData::from_obj_str("# nothing here\n");
        assert!(matches!(result, Err(MeshError::Empty(_))));
    }

    #[test]
    fn test_load_obj_from_file() {
        let path = std::env::temp_dir().join(format!("prism_mesh_{}.obj", std::process::id()));
        std::fs::write(&path, QUAD_OBJ).unwrap();

        let mesh = MeshData::load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_faces_skip_invalid_and_degenerate() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        // valid, out of range, collinear
        let indices = vec![0, 1, 2, 0, 1, 9, 0, 1, 3];
        let mesh = MeshData::new(positions.clone(), indices, None);
        let faces = mesh.faces();

        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].positions, [positions[0], positions[1], positions[2]]);
        assert!(faces[0].normals.is_none());
    }
}
