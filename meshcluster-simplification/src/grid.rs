//! Uniform grid vertex clustering
//!
//! Rossignac & Borrel style clustering: the padded bounding box is cut into
//! `resolution`³ equal cells, every referenced vertex joins the cell it falls
//! in, and each occupied cell collapses to the mean of its members.

use crate::{remap::*, MeshSimplifier, SimplificationOutcome};
use meshcluster_core::{BoundingBox, Error, Point3f, Result, TriangleMesh, Vector3f};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grid resolution used when none is given.
pub const DEFAULT_GRID_RESOLUTION: u32 = 100;

/// Uniform grid clustering simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniformGridSimplifier {
    /// Number of cells along each axis.
    pub resolution: u32,
}

impl Default for UniformGridSimplifier {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_GRID_RESOLUTION,
        }
    }
}

impl UniformGridSimplifier {
    pub fn new(resolution: u32) -> Self {
        Self { resolution }
    }
}

/// Linear binning of a box into `resolution` cells per axis.
#[derive(Debug, Clone, Copy)]
pub struct ClusterGrid {
    origin: Point3f,
    cell_size: Vector3f,
    resolution: usize,
}

impl ClusterGrid {
    pub fn new(bounds: &BoundingBox, resolution: u32) -> Self {
        Self {
            origin: bounds.min,
            cell_size: bounds.dimensions() / resolution as f32,
            resolution: resolution as usize,
        }
    }

    /// Per-axis cell coordinates of `p`.
    ///
    /// Division is truncated, so a point on a cell boundary lands in the
    /// higher cell of the two; coordinates are clamped into the grid and a
    /// zero-extent axis always maps to cell 0.
    pub fn cell_coords(&self, p: &Point3f) -> [usize; 3] {
        let mut coords = [0usize; 3];
        for (axis, c) in coords.iter_mut().enumerate() {
            let size = self.cell_size[axis];
            if size > 0.0 {
                let i = ((p[axis] - self.origin[axis]) / size) as usize;
                *c = i.min(self.resolution - 1);
            }
        }
        coords
    }

    /// Cell key ordered like the flattened index `ix + iy * r + iz * r²`,
    /// without computing it, so any `u32` resolution is safe.
    pub fn cell_key(&self, p: &Point3f) -> (usize, usize, usize) {
        let [ix, iy, iz] = self.cell_coords(p);
        (iz, iy, ix)
    }
}

impl MeshSimplifier for UniformGridSimplifier {
    fn simplify(&self, mesh: &mut TriangleMesh) -> Result<SimplificationOutcome> {
        if self.resolution == 0 {
            return Err(Error::InvalidData("Grid resolution must be at least 1".to_string()));
        }
        if mesh.faces.is_empty() {
            return Err(Error::InvalidData("Mesh has no triangles".to_string()));
        }
        mesh.validate()?;

        let grid = ClusterGrid::new(&mesh.bounding_box.padded(), self.resolution);

        // Cell membership in flattened-index order; each vertex joins once
        let mut cells: BTreeMap<(usize, usize, usize), Vec<usize>> = BTreeMap::new();
        let mut placed = vec![false; mesh.vertex_count()];
        for face in &mesh.faces {
            for &vi in face {
                if !placed[vi] {
                    placed[vi] = true;
                    cells.entry(grid.cell_key(&mesh.vertices[vi])).or_default().push(vi);
                }
            }
        }

        let mut vertex_to_representative = vec![None; mesh.vertex_count()];
        let mut new_vertices = Vec::with_capacity(cells.len());
        let mut new_normals = Vec::with_capacity(cells.len());

        for members in cells.values() {
            let count = members.len() as f32;
            let mut position = Vector3f::zeros();
            let mut normal = Vector3f::zeros();
            for &vi in members {
                position += mesh.vertices[vi].coords;
                normal += mesh.normals[vi];
                vertex_to_representative[vi] = Some(new_vertices.len());
            }
            new_vertices.push(Point3f::from(position / count));
            new_normals.push(normal / count);
        }

        log::debug!(
            "grid {}³: {} occupied cells for {} vertices",
            self.resolution,
            cells.len(),
            mesh.vertex_count()
        );

        let new_faces = remap_faces(&mesh.faces, &vertex_to_representative)?;
        commit_if_reduced(mesh, new_vertices, new_normals, new_faces)
    }
}
