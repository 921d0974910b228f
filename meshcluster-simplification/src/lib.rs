//! Mesh simplification by vertex clustering
//!
//! This crate reduces a triangle mesh by merging vertices that fall in the
//! same spatial cluster:
//! - Uniform grid clustering over the padded bounding box
//! - Adaptive octree clustering with a quadric error representative per leaf
//!
//! Both simplifiers drop triangles whose corners collapse together and only
//! replace the mesh arrays when the vertex count actually goes down.

pub mod adaptive;
pub mod grid;
pub mod octree;
pub mod quadric;
pub mod remap;
pub mod session;

pub use adaptive::*;
pub use grid::*;
pub use octree::*;
pub use quadric::*;
pub use remap::*;
pub use session::*;

use meshcluster_core::{Result, TriangleMesh};
use serde::{Deserialize, Serialize};

/// Simplify a mesh in place
pub trait MeshSimplifier {
    /// Rewrite `mesh` with clustered vertices and surviving triangles.
    ///
    /// The mesh is only modified when the clustered vertex count is strictly
    /// smaller than the current one; otherwise it is left untouched and
    /// [`SimplificationOutcome::Unchanged`] is returned.
    fn simplify(&self, mesh: &mut TriangleMesh) -> Result<SimplificationOutcome>;
}

/// What a simplification pass did to the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplificationOutcome {
    /// New arrays were committed.
    Reduced {
        vertices_before: usize,
        vertices_after: usize,
        faces_before: usize,
        faces_after: usize,
    },
    /// Clustering would not lower the vertex count; the mesh is unchanged.
    Unchanged {
        vertex_count: usize,
        candidate_vertex_count: usize,
    },
}

impl SimplificationOutcome {
    pub fn is_reduced(&self) -> bool {
        matches!(self, SimplificationOutcome::Reduced { .. })
    }
}

/// Clustering strategy together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplificationMode {
    Grid(UniformGridSimplifier),
    Octree(AdaptiveSimplifier),
}

impl MeshSimplifier for SimplificationMode {
    fn simplify(&self, mesh: &mut TriangleMesh) -> Result<SimplificationOutcome> {
        match self {
            SimplificationMode::Grid(s) => s.simplify(mesh),
            SimplificationMode::Octree(s) => s.simplify(mesh),
        }
    }
}

/// Cluster on a `resolution`³ grid over the padded bounding box.
pub fn simplify_uniform(mesh: &mut TriangleMesh, resolution: u32) -> Result<SimplificationOutcome> {
    UniformGridSimplifier::new(resolution).simplify(mesh)
}

/// Cluster in octree leaves holding at most `max_vertices_per_leaf` vertices.
pub fn simplify_adaptive(
    mesh: &mut TriangleMesh,
    max_vertices_per_leaf: usize,
) -> Result<SimplificationOutcome> {
    AdaptiveSimplifier::new(max_vertices_per_leaf).simplify(mesh)
}
