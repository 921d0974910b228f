//! I/O operations for meshes
//!
//! This crate reads and writes the ASCII OFF mesh format. Reading also derives
//! per-vertex averaged face normals and the mesh bounding box.

pub mod off;
pub mod error;

pub use error::*;
pub use off::{OffReader, OffWriter};

use meshcluster_core::{Result, TriangleMesh};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("off") => OffReader::read_mesh(path),
        _ => Err(meshcluster_core::Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("off") => OffWriter::write_mesh(mesh, path),
        _ => Err(meshcluster_core::Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshcluster_core::Point3f;
    use std::fs;

    #[test]
    fn test_auto_detect_roundtrip() {
        let temp_file = std::env::temp_dir().join("meshcluster_auto_detect.off");

        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0), Point3f::new(0.5, 1.0, 0.0)],
            vec![[0, 1, 2]],
        );
        write_mesh(&mesh, &temp_file).unwrap();

        let loaded = read_mesh(&temp_file).unwrap();
        assert_eq!(mesh.vertex_count(), loaded.vertex_count());
        assert_eq!(mesh.faces, loaded.faces);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_unsupported_format() {
        assert!(read_mesh("model.stl").is_err());
        assert!(write_mesh(&TriangleMesh::new(), "model.obj").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = read_mesh(std::env::temp_dir().join("meshcluster_does_not_exist.off"));
        assert!(matches!(result, Err(meshcluster_core::Error::Io(_))));
    }
}
