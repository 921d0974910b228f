//! Original/working mesh pair
//!
//! The original mesh is kept as loaded. Every simplification starts over from
//! a fresh copy of it, so changing parameters never compounds earlier passes.

use crate::{MeshSimplifier, SimplificationMode, SimplificationOutcome};
use meshcluster_algorithms::{compute_valences, compute_vertex_normals, WeightMode};
use meshcluster_core::{Result, TriangleMesh};

/// A loaded mesh together with the copy currently being displayed or written.
#[derive(Debug, Clone)]
pub struct MeshSession {
    original: TriangleMesh,
    working: TriangleMesh,
    weight_mode: WeightMode,
}

impl MeshSession {
    /// Start a session; the working copy gets fresh normals and valences.
    pub fn new(mesh: TriangleMesh, weight_mode: WeightMode) -> Self {
        let mut working = mesh.clone();
        refresh_derived(&mut working, weight_mode);
        Self {
            original: mesh,
            working,
            weight_mode,
        }
    }

    pub fn original(&self) -> &TriangleMesh {
        &self.original
    }

    pub fn working(&self) -> &TriangleMesh {
        &self.working
    }

    pub fn weight_mode(&self) -> WeightMode {
        self.weight_mode
    }

    /// Change the normal weighting and recompute the working normals.
    pub fn set_weight_mode(&mut self, weight_mode: WeightMode) {
        self.weight_mode = weight_mode;
        compute_vertex_normals(&mut self.working, weight_mode);
    }

    /// Simplify a fresh copy of the original and make it the working mesh.
    ///
    /// On error the working mesh is left as it was.
    pub fn regenerate(&mut self, mode: &SimplificationMode) -> Result<SimplificationOutcome> {
        let mut mesh = self.original.clone();
        let outcome = mode.simplify(&mut mesh)?;
        refresh_derived(&mut mesh, self.weight_mode);
        self.working = mesh;
        Ok(outcome)
    }

    /// Drop any simplification and go back to the original mesh.
    pub fn revert(&mut self) {
        let mut mesh = self.original.clone();
        refresh_derived(&mut mesh, self.weight_mode);
        self.working = mesh;
    }

    pub fn into_working(self) -> TriangleMesh {
        self.working
    }
}

fn refresh_derived(mesh: &mut TriangleMesh, weight_mode: WeightMode) {
    compute_vertex_normals(mesh, weight_mode);
    compute_valences(mesh);
}
