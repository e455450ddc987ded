//! Intersectable geometry and the nearest-hit aggregate.

use crate::{HitRecord, Mesh, Plane, Sphere, Triangle};
use prism_math::{Interval, Ray};

/// Anything a ray can be tested against.
pub trait Intersect {
    /// Nearest intersection with `t` strictly inside `ray_t`, or `None` on a miss.
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// The closed set of scene geometry.
#[derive(Clone, Debug)]
pub enum Intersectable {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Mesh(Mesh),
    List(IntersectableList),
}

impl Intersect for Intersectable {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        // Leaves stamp themselves on the record; aggregates keep the child that was hit.
        match self {
            Intersectable::Sphere(s) => s.intersect(ray, ray_t).map(|hit| hit.with_primitive(self)),
            Intersectable::Plane(p) => p.intersect(ray, ray_t).map(|hit| hit.with_primitive(self)),
            Intersectable::Triangle(t) => t.intersect(ray, ray_t).map(|hit| hit.with_primitive(self)),
            Intersectable::Mesh(m) => m.intersect(ray, ray_t),
            Intersectable::List(l) => l.intersect(ray, ray_t),
        }
    }
}

impl From<Sphere> for Intersectable {
    fn from(sphere: Sphere) -> Self {
        Intersectable::Sphere(sphere)
    }
}

impl From<Plane> for Intersectable {
    fn from(plane: Plane) -> Self {
        Intersectable::Plane(plane)
    }
}

impl From<Triangle> for Intersectable {
    fn from(triangle: Triangle) -> Self {
        Intersectable::Triangle(triangle)
    }
}

impl From<Mesh> for Intersectable {
    fn from(mesh: Mesh) -> Self {
        Intersectable::Mesh(mesh)
    }
}

impl From<IntersectableList> for Intersectable {
    fn from(list: IntersectableList) -> Self {
        Intersectable::List(list)
    }
}

/// A list of intersectable objects, tested exhaustively.
#[derive(Clone, Debug, Default)]
pub struct IntersectableList {
    objects: Vec<Intersectable>,
}

impl IntersectableList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Intersectable>) {
        self.objects.push(object.into());
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intersectable> {
        self.objects.iter()
    }
}

impl FromIterator<Intersectable> for IntersectableList {
    fn from_iter<I: IntoIterator<Item = Intersectable>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Intersect for IntersectableList {
    fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(hit);
            }
        }

        closest
    }
}
