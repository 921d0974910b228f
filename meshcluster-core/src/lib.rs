//! Core data structures for meshcluster
//!
//! This crate provides the in-memory mesh model shared by the loader, the
//! normal/valence engines and the simplifiers: vertex positions, normals,
//! placeholder texture coordinates, triangles with their flattened index
//! buffer, valences and the mesh bounding box.

pub mod point;
pub mod bbox;
pub mod mesh;
pub mod error;

pub use point::*;
pub use bbox::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Vector4, Matrix4};

// Type aliases for easier imports
pub type Mesh = TriangleMesh;
