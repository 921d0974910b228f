//! One-ring adjacency and vertex valences

use indexmap::IndexSet;
use meshcluster_core::TriangleMesh;

/// Neighbors of every vertex, in first-seen order, without duplicates.
pub fn collect_one_ring(mesh: &TriangleMesh) -> Vec<IndexSet<usize>> {
    let mut one_ring = vec![IndexSet::new(); mesh.vertex_count()];
    for &[a, b, c] in &mesh.faces {
        one_ring[a].insert(b);
        one_ring[a].insert(c);
        one_ring[b].insert(a);
        one_ring[b].insert(c);
        one_ring[c].insert(a);
        one_ring[c].insert(b);
    }
    one_ring
}

/// Vertex degree: the size of each vertex's one-ring.
pub fn vertex_valences(mesh: &TriangleMesh) -> Vec<usize> {
    collect_one_ring(mesh).iter().map(IndexSet::len).collect()
}

/// Valences scaled by the largest one. The divisor is floored at 1 so a mesh
/// without edges maps to all zeros.
pub fn valence_field(valences: &[usize]) -> Vec<f32> {
    let max_valence = valences.iter().copied().max().unwrap_or(0).max(1) as f32;
    valences.iter().map(|&v| v as f32 / max_valence).collect()
}

/// Recompute valences and the valence field in place.
pub fn compute_valences(mesh: &mut TriangleMesh) {
    let valences = vertex_valences(mesh);
    let field = valence_field(&valences);
    log::debug!(
        "valences computed for {} vertices (max {})",
        valences.len(),
        valences.iter().max().copied().unwrap_or(0)
    );
    mesh.valences = valences;
    mesh.valence_field = field;
}
