//! Triangle meshes built from loaded OBJ data.

use std::sync::Arc;

use crate::{HitRecord, Intersect, Intersectable, IntersectableList, Material, Triangle};
use prism_core::MeshData;
use prism_math::{Interval, Ray};

/// An aggregate of triangles sharing one material.
#[derive(Clone, Debug)]
pub struct Mesh {
    triangles: IntersectableList,
}

impl Mesh {
    /// Build triangles from mesh data. Faces with vertex normals interpolate them.
    pub fn from_data(data: &MeshData, material: Arc<Material>) -> Self {
        let triangles = data
            .faces()
            .into_iter()
            .map(|face| {
                let [a, b, c] = face.positions;
                let triangle = match face.normals {
                    Some(normals) => Triangle::with_vertex_normals(a, b, c, normals, material.clone()),
                    None => Triangle::new(a, b, c, material.clone()),
                };
                Intersectable::Triangle(triangle)
            })
            .collect();

        Self { triangles }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

impl Intersect for Mesh {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        self.triangles.intersect(ray, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Diffuse};
    use prism_math::Vec3;

    const QUAD: &str = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
f 1 2 3 4
";

    #[test]
    fn test_mesh_from_obj_quad() {
        let data = MeshData::from_obj_str(QUAD).unwrap();
        let mesh = Mesh::from_data(&data, Arc::new(Material::Diffuse(Diffuse::new(Color::ONE))));
        assert_eq!(mesh.triangle_count(), 2);

        for origin in [Vec3::new(0.5, -0.5, 5.0), Vec3::new(-0.5, 0.5, 5.0)] {
            let hit = mesh.intersect(&Ray::new(origin, -Vec3::Z), Interval::POSITIVE).unwrap();
            assert!((hit.t - 5.0).abs() < 1e-5);
            assert!(matches!(hit.primitive, Some(Intersectable::Triangle(_))));
        }
        assert!(mesh
            .intersect(&Ray::new(Vec3::new(2.0, 0.0, 5.0), -Vec3::Z), Interval::POSITIVE)
            .is_none());
    }
}
