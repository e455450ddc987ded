// Vector utilities for Vec3
//
// Extends glam::Vec3 with the operations the shading code is written against.
// glam's own normalize() silently yields NaN on a zero vector; unit() refuses.

use glam::Vec3;

/// Extension trait for Vec3 to provide ray tracing utilities
pub trait Vec3Ext {
    /// Normalize to unit length.
    ///
    /// # Panics
    /// Panics if the vector has zero (or non-finite) length. A zero direction
    /// at this point means an earlier stage let degenerate geometry through.
    fn unit(self) -> Vec3;

    /// Mirror this vector about `normal`: `2(n·v)n - v`.
    ///
    /// Both vectors point away from the surface, so the result does too.
    fn reflected_on(self, normal: Vec3) -> Vec3;

    /// Direction pointing back toward where a ray travelling along `self` came from.
    fn incident_direction(self) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn unit(self) -> Vec3 {
        let length = self.length();
        assert!(
            length > 0.0 && length.is_finite(),
            "cannot normalize degenerate vector {:?}",
            self
        );
        self / length
    }

    #[inline]
    fn reflected_on(self, normal: Vec3) -> Vec3 {
        2.0 * normal.dot(self) * normal - self
    }

    #[inline]
    fn incident_direction(self) -> Vec3 {
        -self.unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_length() {
        let v = Vec3::new(3.0, 4.0, 0.0).unit();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "cannot normalize")]
    fn test_unit_zero_panics() {
        let _ = Vec3::ZERO.unit();
    }

    #[test]
    fn test_reflect_about_normal() {
        let n = Vec3::Y;
        let w = Vec3::new(1.0, 1.0, 0.0).unit();
        let r = w.reflected_on(n);
        assert!((r - Vec3::new(-1.0, 1.0, 0.0).unit()).length() < 1e-6);
    }

    #[test]
    fn test_double_reflection_is_identity() {
        let normals = [
            Vec3::Y,
            Vec3::new(1.0, 2.0, -0.5).unit(),
            Vec3::new(-0.3, 0.1, 0.9).unit(),
        ];
        let dirs = [
            Vec3::new(0.2, 0.7, 0.1),
            Vec3::new(-1.0, 0.0, 3.0),
            Vec3::new(0.0, -2.0, 0.5),
        ];

        for n in normals {
            for d in dirs {
                let twice = d.reflected_on(n).reflected_on(n);
                assert!((twice - d).length() < 1e-5, "{:?} != {:?}", twice, d);
            }
        }
    }

    #[test]
    fn test_incident_direction() {
        let w = Vec3::new(0.0, 0.0, -5.0).incident_direction();
        assert_eq!(w, Vec3::Z);
    }
}
