//! Mesh data structures and functionality

use crate::{bbox::BoundingBox, point::*, Error, Result};
use serde::{Deserialize, Serialize};

/// A triangle mesh with per-vertex attributes and derived display data.
///
/// ```text
/// P0 ---- P1       faces:     [0, 1, 2] [1, 2, 3]
///  \    /  \       indices:   0 1 2 1 2 3
///   \  /    \      vertices:  P0 P1 P2 P3
///    P2 --- P3     valences:   2  3  3  2
/// ```
///
/// `vertices`, `normals` and `uvs` always share one index space. `indices` is
/// the flattened form of `faces`. The bounding box is taken once at load time
/// and is not tightened when simplification shrinks the mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub normals: Vec<Vector3f>,
    pub uvs: Vec<UV>,
    pub faces: Vec<[usize; 3]>,
    pub indices: Vec<u32>,
    pub valences: Vec<usize>,
    pub valence_field: Vec<f32>,
    pub bounding_box: BoundingBox,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            faces: Vec::new(),
            indices: Vec::new(),
            valences: Vec::new(),
            valence_field: Vec::new(),
            bounding_box: BoundingBox::default(),
        }
    }

    /// Create a mesh from vertices and faces, with zero normals.
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        let normals = vec![Vector3f::zeros(); vertices.len()];
        Self::from_parts(vertices, normals, faces)
    }

    /// Create a mesh from vertices, per-vertex normals and faces.
    ///
    /// The bounding box and index buffer are derived here; valences stay empty
    /// until computed.
    pub fn from_parts(vertices: Vec<Point3f>, normals: Vec<Vector3f>, faces: Vec<[usize; 3]>) -> Self {
        let bounding_box = BoundingBox::from_points(&vertices);
        let uvs = vec![UV_PLACEHOLDER; vertices.len()];
        let indices = flatten_faces(&faces);
        Self {
            vertices,
            normals,
            uvs,
            faces,
            indices,
            valences: Vec::new(),
            valence_field: Vec::new(),
            bounding_box,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Flattened triangle indices, three per face
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    pub fn center(&self) -> Point3f {
        self.bounding_box.center()
    }

    /// Calculate unit face normals from the edge cross product
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1.cross(&edge2).normalize()
            })
            .collect()
    }

    /// Replace vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) -> Result<()> {
        if normals.len() != self.vertices.len() {
            return Err(Error::InvalidData(format!(
                "expected {} normals, got {}",
                self.vertices.len(),
                normals.len()
            )));
        }
        self.normals = normals;
        Ok(())
    }

    /// Replace valences and their normalized field
    pub fn set_valences(&mut self, valences: Vec<usize>, valence_field: Vec<f32>) -> Result<()> {
        if valences.len() != self.vertices.len() || valence_field.len() != self.vertices.len() {
            return Err(Error::InvalidData(format!(
                "expected {} valences, got {} (field {})",
                self.vertices.len(),
                valences.len(),
                valence_field.len()
            )));
        }
        self.valences = valences;
        self.valence_field = valence_field;
        Ok(())
    }

    /// Substitute the vertex, normal and triangle arrays in one step.
    ///
    /// The index buffer is rebuilt, texture coordinates are resized to the new
    /// vertex count and stale valences are dropped. The bounding box is kept.
    pub fn replace_geometry(
        &mut self,
        vertices: Vec<Point3f>,
        normals: Vec<Vector3f>,
        faces: Vec<[usize; 3]>,
    ) -> Result<()> {
        if normals.len() != vertices.len() {
            return Err(Error::InvalidData(format!(
                "{} vertices but {} normals",
                vertices.len(),
                normals.len()
            )));
        }
        check_face_indices(&faces, vertices.len())?;

        self.indices = flatten_faces(&faces);
        self.uvs = vec![UV_PLACEHOLDER; vertices.len()];
        self.vertices = vertices;
        self.normals = normals;
        self.faces = faces;
        self.valences.clear();
        self.valence_field.clear();
        Ok(())
    }

    /// Check that every face index refers to an existing vertex and that the
    /// parallel arrays agree in length.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        if self.normals.len() != n || self.uvs.len() != n {
            return Err(Error::InvalidData(format!(
                "{} vertices, {} normals, {} uvs",
                n,
                self.normals.len(),
                self.uvs.len()
            )));
        }
        if self.indices.len() != self.faces.len() * 3 {
            return Err(Error::InvalidData("index buffer out of sync with faces".to_string()));
        }
        check_face_indices(&self.faces, n)
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten_faces(faces: &[[usize; 3]]) -> Vec<u32> {
    faces.iter().flatten().map(|&i| i as u32).collect()
}

fn check_face_indices(faces: &[[usize; 3]], vertex_count: usize) -> Result<()> {
    for (fi, face) in faces.iter().enumerate() {
        if let Some(&bad) = face.iter().find(|&&vi| vi >= vertex_count) {
            return Err(Error::InvalidData(format!(
                "face {} references vertex {} but mesh has {} vertices",
                fi, bad, vertex_count
            )));
        }
    }
    Ok(())
}
