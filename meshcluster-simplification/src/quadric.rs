//! Quadric error metric helpers
//!
//! Planes are kept in implicit form `ax + by + cz + d = 0` without scaling the
//! normal to unit length, so larger triangles weigh more in the summed quadric.

use meshcluster_core::Point3f;
use nalgebra::{Matrix4, RowVector4, Vector4};

/// Implicit plane through three points: `(a, b, c)` is the edge cross product
/// `(p2 - p1) × (p3 - p1)` and `d = -a·x1 - b·y1 - c·z1`.
pub fn plane_equation(p1: &Point3f, p2: &Point3f, p3: &Point3f) -> Vector4<f64> {
    let p1 = p1.cast::<f64>();
    let n = (p2.cast::<f64>() - p1).cross(&(p3.cast::<f64>() - p1));
    Vector4::new(n.x, n.y, n.z, -n.x * p1.x - n.y * p1.y - n.z * p1.z)
}

/// Fundamental error quadric of a plane: the outer product `p pᵀ`.
pub fn fundamental_quadric(plane: &Vector4<f64>) -> Matrix4<f64> {
    plane * plane.transpose()
}

/// Point minimizing the quadric error, or `None` when the system is singular.
///
/// The last row is replaced by `(0, 0, 0, 1)` and the position is read from
/// `Q⁻¹ · (0, 0, 0, 1)ᵀ`.
pub fn optimal_point(quadric: &Matrix4<f64>) -> Option<Point3f> {
    let mut q = *quadric;
    q.set_row(3, &RowVector4::new(0.0, 0.0, 0.0, 1.0));

    let inverse = q.try_inverse()?;
    let v = inverse * Vector4::new(0.0, 0.0, 0.0, 1.0);
    let p = Point3f::new(v.x as f32, v.y as f32, v.z as f32);
    (p.x.is_finite() && p.y.is_finite() && p.z.is_finite()).then_some(p)
}

/// Squared plane-distance error of `p` under `quadric`.
pub fn quadric_error(quadric: &Matrix4<f64>, p: &Point3f) -> f64 {
    let v = Vector4::new(p.x as f64, p.y as f64, p.z as f64, 1.0);
    (v.transpose() * quadric * v)[0]
}
