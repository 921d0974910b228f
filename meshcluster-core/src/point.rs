//! Point and attribute types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Per-vertex texture coordinate
pub type UV = [f32; 2];

/// Texture coordinate assigned to every vertex; meshes carry no real mapping.
pub const UV_PLACEHOLDER: UV = [1.0, 1.0];
