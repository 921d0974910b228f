//! Adaptive octree clustering with quadric error representatives
//!
//! The octree is refined top-down. Each node scans the triangles handed down
//! by its parent, collects the vertices inside its box and splits as soon as
//! it holds more than the per-leaf threshold. A leaf collapses its members to
//! the point minimizing the summed quadric of the triangles that brought those
//! members in, falling back to their centroid when the quadric is singular or
//! its minimum leaves the leaf box.

use crate::{quadric::*, remap::*, MeshSimplifier, Octree, SimplificationOutcome};
use meshcluster_core::{Error, Point3f, Result, TriangleMesh, Vector3f};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default per-leaf vertex threshold.
pub const DEFAULT_MAX_VERTICES_PER_LEAF: usize = 5;

/// Default subdivision depth cap.
pub const DEFAULT_MAX_DEPTH: u32 = 20;

/// Largest accepted depth cap. Refinement recurses once per level, and an f32
/// box stops halving well before this.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// Adaptive (octree + QEM) clustering simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveSimplifier {
    /// A node splits once it holds more vertices than this.
    pub max_vertices_per_leaf: usize,
    /// Nodes at this depth never split, whatever their member count.
    pub max_depth: u32,
}

impl Default for AdaptiveSimplifier {
    fn default() -> Self {
        Self {
            max_vertices_per_leaf: DEFAULT_MAX_VERTICES_PER_LEAF,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of refining an octree over a mesh.
#[derive(Debug, Clone)]
pub struct OctreeClustering {
    pub octree: Octree,
    /// One point per non-empty leaf, in leaf visiting order.
    pub representatives: Vec<Point3f>,
    /// Representative index of every vertex referenced by a face.
    pub vertex_to_representative: Vec<Option<usize>>,
}

impl AdaptiveSimplifier {
    pub fn new(max_vertices_per_leaf: usize) -> Self {
        Self {
            max_vertices_per_leaf,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the octree over the padded bounding box and pick a representative
    /// for every leaf.
    pub fn build_octree(&self, mesh: &TriangleMesh) -> Result<OctreeClustering> {
        if self.max_vertices_per_leaf == 0 {
            return Err(Error::InvalidData(
                "Leaf threshold must be at least 1 vertex".to_string(),
            ));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(Error::InvalidData(format!(
                "Octree depth cap {} exceeds the limit of {}",
                self.max_depth, MAX_DEPTH_LIMIT
            )));
        }

        let mut octree = Octree::new(mesh.bounding_box.padded());
        let mut leaves = LeafCollapse {
            representatives: Vec::new(),
            vertex_to_representative: vec![None; mesh.vertex_count()],
        };
        let all_faces: Vec<usize> = (0..mesh.face_count()).collect();
        self.refine(&mut octree, &all_faces, mesh, &mut leaves);

        let clustering = OctreeClustering {
            octree,
            representatives: leaves.representatives,
            vertex_to_representative: leaves.vertex_to_representative,
        };
        log::debug!(
            "octree: {} nodes, {} leaves, depth {}, {} representatives",
            clustering.octree.node_count(),
            clustering.octree.leaves().len(),
            clustering.octree.max_depth(),
            clustering.representatives.len()
        );
        Ok(clustering)
    }

    fn refine(
        &self,
        node: &mut Octree,
        candidates: &[usize],
        mesh: &TriangleMesh,
        leaves: &mut LeafCollapse,
    ) {
        let mut seen = HashSet::new();
        // Faces that contributed a new member, for the quadric
        let mut touched: Vec<usize> = Vec::new();
        // Faces with any corner inside, handed to the children
        let mut passed: Vec<usize> = Vec::new();

        for &fi in candidates {
            let mut intersects = false;
            for &vi in &mesh.faces[fi] {
                if node.contains_vertex(&mesh.vertices[vi]) {
                    intersects = true;
                    if seen.insert(vi) {
                        node.push_member(vi);
                        if touched.last() != Some(&fi) {
                            touched.push(fi);
                        }
                    }
                }

                // Splitting does not stop the scan: the children need every
                // face crossing this node.
                if node.is_leaf()
                    && node.members().len() > self.max_vertices_per_leaf
                    && node.depth() < self.max_depth
                {
                    node.generate_children();
                }
            }
            if intersects {
                passed.push(fi);
            }
        }

        if let Some(children) = node.children_mut() {
            for child in children.iter_mut() {
                self.refine(child, &passed, mesh, leaves);
            }
            return;
        }

        if node.members().is_empty() {
            return;
        }

        let quadric = touched
            .iter()
            .map(|&fi| {
                let [a, b, c] = mesh.faces[fi];
                fundamental_quadric(&plane_equation(
                    &mesh.vertices[a],
                    &mesh.vertices[b],
                    &mesh.vertices[c],
                ))
            })
            .fold(Matrix4::zeros(), |acc, q| acc + q);

        let representative = optimal_point(&quadric)
            .filter(|p| node.contains_vertex(p))
            .unwrap_or_else(|| centroid(node.members(), &mesh.vertices));

        log::trace!(
            "leaf at depth {}: {} members, {} planes, error {:.3e}",
            node.depth(),
            node.members().len(),
            touched.len(),
            quadric_error(&quadric, &representative)
        );

        let index = leaves.representatives.len();
        for &vi in node.members() {
            leaves.vertex_to_representative[vi] = Some(index);
        }
        leaves.representatives.push(representative);
    }
}

/// Output accumulated while leaves are collapsed.
struct LeafCollapse {
    representatives: Vec<Point3f>,
    vertex_to_representative: Vec<Option<usize>>,
}

impl MeshSimplifier for AdaptiveSimplifier {
    /// Normals of the simplified mesh are zero until recomputed.
    fn simplify(&self, mesh: &mut TriangleMesh) -> Result<SimplificationOutcome> {
        if mesh.faces.is_empty() {
            return Err(Error::InvalidData("Mesh has no triangles".to_string()));
        }
        mesh.validate()?;

        let clustering = self.build_octree(mesh)?;
        let new_faces = remap_faces(&mesh.faces, &clustering.vertex_to_representative)?;
        let new_normals = vec![Vector3f::zeros(); clustering.representatives.len()];
        commit_if_reduced(mesh, clustering.representatives, new_normals, new_faces)
    }
}

fn centroid(members: &[usize], vertices: &[Point3f]) -> Point3f {
    let sum = members
        .iter()
        .fold(Vector3f::zeros(), |acc, &vi| acc + vertices[vi].coords);
    Point3f::from(sum / members.len() as f32)
}
