//! Smoothed vertex normals
//!
//! Each face normal is accumulated into its three corners, weighted by one of
//! the [`WeightMode`] policies, then every vertex sum is normalized.

use meshcluster_core::{Error, Point3f, TriangleMesh, Vector3f};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How face normals are weighted when accumulated into a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeightMode {
    /// Every incident face contributes its normal unweighted.
    #[default]
    Uniform,
    /// Faces are weighted by half the dot product of their two edges from the
    /// first corner, relative to the sum of that measure around the vertex.
    ///
    /// This is not the cross-product area; the dot-product measure is kept so
    /// results match the established behavior.
    AreaWeighted,
    /// Faces are weighted by the corner angle at the vertex, relative to the
    /// sum of incident corner angles.
    AngleWeighted,
}

impl TryFrom<u8> for WeightMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WeightMode::Uniform),
            1 => Ok(WeightMode::AreaWeighted),
            2 => Ok(WeightMode::AngleWeighted),
            other => Err(Error::InvalidData(format!("unknown weight mode {}", other))),
        }
    }
}

impl FromStr for WeightMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(WeightMode::Uniform),
            "area" | "area-weighted" => Ok(WeightMode::AreaWeighted),
            "angle" | "angle-weighted" => Ok(WeightMode::AngleWeighted),
            other => Err(Error::InvalidData(format!("unknown weight mode '{}'", other))),
        }
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeightMode::Uniform => "uniform",
            WeightMode::AreaWeighted => "area",
            WeightMode::AngleWeighted => "angle",
        };
        f.write_str(name)
    }
}

/// Recompute the mesh's vertex normals in place.
///
/// Vertices with no incident face (or whose weights cancel out) end up with a
/// NaN direction; this is not guarded.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh, mode: WeightMode) {
    log::debug!(
        "computing {} vertex normals for {} vertices / {} faces",
        mode,
        mesh.vertex_count(),
        mesh.face_count()
    );
    mesh.normals = smooth_vertex_normals(mesh, mode);
}

/// Smoothed vertex normals for `mesh` without modifying it.
pub fn smooth_vertex_normals(mesh: &TriangleMesh, mode: WeightMode) -> Vec<Vector3f> {
    let face_normals = mesh.calculate_face_normals();
    let mut normals = vec![Vector3f::zeros(); mesh.vertex_count()];

    match mode {
        WeightMode::Uniform => {
            for (face, n) in mesh.faces.iter().zip(&face_normals) {
                for &vi in face {
                    normals[vi] += n;
                }
            }
        }
        WeightMode::AreaWeighted => {
            let measures: Vec<f32> = mesh
                .faces
                .iter()
                .map(|f| dot_measure(&mesh.vertices[f[0]], &mesh.vertices[f[1]], &mesh.vertices[f[2]]))
                .collect();

            let mut totals = vec![0.0f32; mesh.vertex_count()];
            for (face, &m) in mesh.faces.iter().zip(&measures) {
                for &vi in face {
                    totals[vi] += m;
                }
            }

            for ((face, n), &m) in mesh.faces.iter().zip(&face_normals).zip(&measures) {
                for &vi in face {
                    normals[vi] += n * (m / totals[vi]);
                }
            }
        }
        WeightMode::AngleWeighted => {
            let angles: Vec<[f32; 3]> = mesh
                .faces
                .iter()
                .map(|f| corner_angles(&mesh.vertices[f[0]], &mesh.vertices[f[1]], &mesh.vertices[f[2]]))
                .collect();

            let mut totals = vec![0.0f32; mesh.vertex_count()];
            for (face, corners) in mesh.faces.iter().zip(&angles) {
                for (&vi, &a) in face.iter().zip(corners) {
                    totals[vi] += a;
                }
            }

            for ((face, n), corners) in mesh.faces.iter().zip(&face_normals).zip(&angles) {
                for (&vi, &a) in face.iter().zip(corners) {
                    normals[vi] += n * (a / totals[vi]);
                }
            }
        }
    }

    for n in normals.iter_mut() {
        *n = n.normalize();
    }
    normals
}

/// Half the dot product of the two edges leaving `p0`.
fn dot_measure(p0: &Point3f, p1: &Point3f, p2: &Point3f) -> f32 {
    (p1 - p0).dot(&(p2 - p0)) / 2.0
}

/// Corner weights at `p0`, `p1` and `p2`.
///
/// The cosine ratio is passed through a degrees-to-radians conversion before
/// `acos`, so the weights are not true angles. Kept as established behavior.
fn corner_angles(p0: &Point3f, p1: &Point3f, p2: &Point3f) -> [f32; 3] {
    let corner = |a: &Point3f, b: &Point3f, c: &Point3f| {
        let u = b - a;
        let v = c - a;
        (u.dot(&v) / (u.norm() * v.norm())).to_radians().acos()
    };
    [corner(p0, p1, p2), corner(p1, p2, p0), corner(p2, p0, p1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_quad() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    fn make_tent() -> TriangleMesh {
        // Two faces folded along the y axis
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(-1.0, 0.3, -1.0),
                Point3f::new(2.0, 0.4, -0.5),
            ],
            vec![[0, 2, 1], [0, 1, 3]],
        )
    }

    #[test]
    fn test_planar_quad_uniform() {
        let mut mesh = make_quad();
        compute_vertex_normals(&mut mesh, WeightMode::Uniform);
        for n in &mesh.normals {
            assert_relative_eq!(*n, Vector3f::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_planar_quad_all_modes_agree() {
        for mode in [WeightMode::Uniform, WeightMode::AreaWeighted, WeightMode::AngleWeighted] {
            let normals = smooth_vertex_normals(&make_quad(), mode);
            for n in &normals {
                assert_relative_eq!(*n, Vector3f::new(0.0, 0.0, 1.0), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = make_tent();
        for mode in [WeightMode::Uniform, WeightMode::AreaWeighted, WeightMode::AngleWeighted] {
            for n in smooth_vertex_normals(&mesh, mode) {
                assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut mesh = make_tent();
        compute_vertex_normals(&mut mesh, WeightMode::AngleWeighted);
        let first = mesh.normals.clone();
        compute_vertex_normals(&mut mesh, WeightMode::AngleWeighted);
        assert_eq!(first, mesh.normals);
    }

    #[test]
    fn test_weighting_changes_shared_vertex() {
        let mesh = make_tent();
        let uniform = smooth_vertex_normals(&mesh, WeightMode::Uniform);
        let area = smooth_vertex_normals(&mesh, WeightMode::AreaWeighted);
        // Vertices 0 and 1 are shared by faces of different shape
        assert!((uniform[0] - area[0]).norm() > 1e-4);
        // A vertex owned by a single face keeps that face's normal
        assert_relative_eq!(uniform[2], area[2], epsilon = 1e-6);
    }

    #[test]
    fn test_dot_measure_is_not_area() {
        // Right angle at p0: the edge dot product vanishes although the area is 0.5
        let m = dot_measure(
            &Point3f::new(0.0, 0.0, 0.0),
            &Point3f::new(1.0, 0.0, 0.0),
            &Point3f::new(0.0, 1.0, 0.0),
        );
        assert_eq!(m, 0.0);
    }

    #[test]
    fn test_corner_angles_use_radian_converted_cosine() {
        let angles = corner_angles(
            &Point3f::new(0.0, 0.0, 0.0),
            &Point3f::new(1.0, 0.0, 0.0),
            &Point3f::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(angles[0], std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
        let cos45 = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(angles[1], cos45.to_radians().acos(), epsilon = 1e-6);
        assert!(angles[1] > std::f32::consts::FRAC_PI_4);
    }

    #[test]
    fn test_weight_mode_parsing() {
        assert_eq!(WeightMode::try_from(0).unwrap(), WeightMode::Uniform);
        assert_eq!(WeightMode::try_from(1).unwrap(), WeightMode::AreaWeighted);
        assert_eq!(WeightMode::try_from(2).unwrap(), WeightMode::AngleWeighted);
        assert!(WeightMode::try_from(3).is_err());

        assert_eq!("angle".parse::<WeightMode>().unwrap(), WeightMode::AngleWeighted);
        assert_eq!("Area".parse::<WeightMode>().unwrap(), WeightMode::AreaWeighted);
        assert!("cotangent".parse::<WeightMode>().is_err());
        assert_eq!(WeightMode::AreaWeighted.to_string(), "area");
    }
}
