//! Triangle remapping and commit of clustered geometry

use crate::SimplificationOutcome;
use itertools::Itertools;
use meshcluster_core::{Error, Point3f, Result, TriangleMesh, Vector3f};

/// Map every face onto representative indices, dropping faces whose corners
/// no longer reference three distinct representatives.
///
/// `vertex_to_representative` must hold a slot for every vertex a face uses.
pub fn remap_faces(
    faces: &[[usize; 3]],
    vertex_to_representative: &[Option<usize>],
) -> Result<Vec<[usize; 3]>> {
    let mut remapped = Vec::with_capacity(faces.len());
    for (fi, face) in faces.iter().enumerate() {
        let mut mapped = [0usize; 3];
        for (slot, &vi) in mapped.iter_mut().zip(face) {
            *slot = vertex_to_representative
                .get(vi)
                .copied()
                .flatten()
                .ok_or_else(|| {
                    Error::Algorithm(format!("vertex {} of face {} has no representative", vi, fi))
                })?;
        }

        if mapped.iter().all_unique() {
            remapped.push(mapped);
        }
    }
    Ok(remapped)
}

/// Replace the mesh arrays when the clustered vertex count is strictly smaller.
pub fn commit_if_reduced(
    mesh: &mut TriangleMesh,
    vertices: Vec<Point3f>,
    normals: Vec<Vector3f>,
    faces: Vec<[usize; 3]>,
) -> Result<SimplificationOutcome> {
    let vertices_before = mesh.vertex_count();
    let faces_before = mesh.face_count();

    if vertices.len() >= vertices_before {
        log::warn!(
            "minimum simplification reached: {} clustered vertices for {} original, mesh unchanged",
            vertices.len(),
            vertices_before
        );
        return Ok(SimplificationOutcome::Unchanged {
            vertex_count: vertices_before,
            candidate_vertex_count: vertices.len(),
        });
    }

    let vertices_after = vertices.len();
    let faces_after = faces.len();
    mesh.replace_geometry(vertices, normals, faces)?;

    log::info!(
        "simplified {} -> {} vertices, {} -> {} faces",
        vertices_before,
        vertices_after,
        faces_before,
        faces_after
    );
    Ok(SimplificationOutcome::Reduced {
        vertices_before,
        vertices_after,
        faces_before,
        faces_after,
    })
}
