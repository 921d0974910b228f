//! Axis-aligned bounding box

use crate::point::*;
use serde::{Deserialize, Serialize};

/// Fraction of each bound's magnitude pushed outward by [`BoundingBox::padded`].
pub const PADDING_FACTOR: f64 = 0.1;

/// Axis-aligned box stored as per-axis (min, max) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3f,
    pub max: Point3f,
}

impl BoundingBox {
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Tight box around `points`. An empty slice yields a box collapsed at the origin.
    pub fn from_points(points: &[Point3f]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            for axis in 0..3 {
                if min[axis] > p[axis] {
                    min[axis] = p[axis];
                }
                if max[axis] < p[axis] {
                    max[axis] = p[axis];
                }
            }
        }
        Self { min, max }
    }

    /// Box inflated by 10% of `|min|` below and 10% of `|max|` above, per axis.
    ///
    /// The pad depends on the magnitude of each bound rather than on the box
    /// extent, so it is asymmetric and vanishes for bounds sitting at zero.
    /// Cell assignment in both simplifiers depends on these exact values.
    pub fn padded(&self) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..3 {
            min[axis] += (-PADDING_FACTOR * (self.min[axis].abs() as f64)) as f32;
            max[axis] += (PADDING_FACTOR * (self.max[axis].abs() as f64)) as f32;
        }
        Self { min, max }
    }

    /// Extent along each axis.
    pub fn dimensions(&self) -> Vector3f {
        self.max - self.min
    }

    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// Inclusive containment test on all three axes.
    pub fn contains(&self, p: &Point3f) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Point3f::origin(),
            max: Point3f::origin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(&[
            Point3f::new(1.0, -2.0, 0.5),
            Point3f::new(-1.0, 3.0, 0.0),
            Point3f::new(0.0, 0.0, 2.0),
        ]);
        assert_eq!(bbox.min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, Point3f::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_from_empty_points() {
        let bbox = BoundingBox::from_points(&[]);
        assert_eq!(bbox, BoundingBox::default());
    }

    #[test]
    fn test_padding_is_asymmetric() {
        let bbox = BoundingBox::new(Point3f::new(-2.0, 0.0, 1.0), Point3f::new(4.0, 0.0, 3.0));
        let padded = bbox.padded();

        assert_relative_eq!(padded.min.x, -2.2, epsilon = 1e-6);
        assert_relative_eq!(padded.max.x, 4.4, epsilon = 1e-6);
        // Bounds at zero receive no pad at all
        assert_eq!(padded.min.y, 0.0);
        assert_eq!(padded.max.y, 0.0);
        // A positive low bound is pulled toward zero, not away from the box
        assert_relative_eq!(padded.min.z, 0.9, epsilon = 1e-6);
        assert_relative_eq!(padded.max.z, 3.3, epsilon = 1e-6);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bbox = BoundingBox::new(Point3f::origin(), Point3f::new(1.0, 1.0, 1.0));
        assert!(bbox.contains(&Point3f::new(0.0, 0.0, 0.0)));
        assert!(bbox.contains(&Point3f::new(1.0, 1.0, 1.0)));
        assert!(bbox.contains(&Point3f::new(0.5, 1.0, 0.0)));
        assert!(!bbox.contains(&Point3f::new(1.0001, 0.5, 0.5)));
        assert!(!bbox.contains(&Point3f::new(0.5, -0.0001, 0.5)));
    }

    #[test]
    fn test_center_and_dimensions() {
        let bbox = BoundingBox::new(Point3f::new(-1.0, 0.0, 2.0), Point3f::new(1.0, 4.0, 3.0));
        assert_eq!(bbox.center(), Point3f::new(0.0, 2.0, 2.5));
        assert_eq!(bbox.dimensions(), Vector3f::new(2.0, 4.0, 1.0));
    }
}
