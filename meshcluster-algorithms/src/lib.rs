//! # meshcluster algorithms
//!
//! Per-vertex quantities derived from mesh connectivity: smoothed vertex
//! normals under several weighting policies, one-ring adjacency, valences
//! and the normalized valence field used for display.

pub mod normals;
pub mod valence;

// Re-export commonly used items
pub use normals::*;
pub use valence::*;
