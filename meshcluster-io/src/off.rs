//! OFF format support
//!
//! ```text
//! OFF
//! <vertex count> <face count> <edge count>
//! x y z                  (one line per vertex)
//! 3 i j k                (one line per face, triangles only)
//! ```
//!
//! Tokens are whitespace separated, so counts may share a line with the
//! header. Everything after a `#` on a line is ignored. The edge count is read
//! but unused.

use crate::{IoError, MeshReader, MeshWriter};
use meshcluster_core::{Point3f, Result, TriangleMesh, Vector3f};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

pub struct OffReader;
pub struct OffWriter;

impl OffReader {
    /// Parse OFF content already held in memory.
    pub fn parse_str(content: &str) -> std::result::Result<TriangleMesh, IoError> {
        let mut tokens = content
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace);

        match tokens.next() {
            Some("OFF") => {}
            Some(other) => {
                return Err(IoError::InvalidFormat {
                    format: format!("expected OFF header, found '{}'", other),
                })
            }
            None => {
                return Err(IoError::InvalidFormat {
                    format: "empty input, expected OFF header".to_string(),
                })
            }
        }

        let vertex_count: usize = next_value(&mut tokens, "vertex count")?;
        let face_count: usize = next_value(&mut tokens, "face count")?;
        let _edge_count: usize = next_value(&mut tokens, "edge count")?;

        // Header counts are untrusted; every record needs at least one byte
        let mut vertices = Vec::with_capacity(vertex_count.min(content.len()));
        for _ in 0..vertex_count {
            let x: f32 = next_value(&mut tokens, "vertex x")?;
            let y: f32 = next_value(&mut tokens, "vertex y")?;
            let z: f32 = next_value(&mut tokens, "vertex z")?;
            vertices.push(Point3f::new(x, y, z));
        }

        let mut faces = Vec::with_capacity(face_count.min(content.len()));
        for f in 0..face_count {
            let corners: usize = next_value(&mut tokens, "face vertex count")?;
            if corners != 3 {
                return Err(IoError::ParseError {
                    message: format!("face {} has {} vertices, only triangles are supported", f, corners),
                });
            }

            let mut face = [0usize; 3];
            for slot in face.iter_mut() {
                let vi: usize = next_value(&mut tokens, "face vertex index")?;
                if vi >= vertex_count {
                    return Err(IoError::ParseError {
                        message: format!("face {} references vertex {} of {}", f, vi, vertex_count),
                    });
                }
                *slot = vi;
            }
            faces.push(face);
        }

        let normals = averaged_face_normals(&vertices, &faces);
        Ok(TriangleMesh::from_parts(vertices, normals, faces))
    }

    /// Parse OFF content from any reader.
    pub fn read_from<R: Read>(mut reader: R) -> std::result::Result<TriangleMesh, IoError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse_str(&content)
    }
}

impl MeshReader for OffReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => IoError::Io(e),
        })?;

        let mesh = Self::read_from(file).inspect_err(|e| {
            log::warn!("failed to load {}: {}", path.display(), e);
        })?;

        let bbox = mesh.bounding_box;
        log::info!(
            "loaded {} ({} vertices, {} faces), bounds x [{}, {}] y [{}, {}] z [{}, {}]",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count(),
            bbox.min.x,
            bbox.max.x,
            bbox.min.y,
            bbox.max.y,
            bbox.min.z,
            bbox.max.z
        );
        Ok(mesh)
    }
}

impl OffWriter {
    /// Write `mesh` as ASCII OFF to any writer.
    pub fn write_to<W: Write>(mesh: &TriangleMesh, writer: W) -> std::result::Result<(), IoError> {
        let mut out = BufWriter::new(writer);
        writeln!(out, "OFF")?;
        writeln!(out, "{} {} 0", mesh.vertex_count(), mesh.face_count())?;
        for v in &mesh.vertices {
            writeln!(out, "{} {} {}", v.x, v.y, v.z)?;
        }
        for f in &mesh.faces {
            writeln!(out, "3 {} {} {}", f[0], f[1], f[2])?;
        }
        out.flush().map_err(|e| IoError::WriteError {
            message: e.to_string(),
        })
    }
}

impl MeshWriter for OffWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(IoError::Io)?;
        Self::write_to(mesh, file)?;
        Ok(())
    }
}

fn next_value<'a, T, I>(tokens: &mut I, what: &str) -> std::result::Result<T, IoError>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or_else(|| IoError::ParseError {
        message: format!("unexpected end of input, expected {}", what),
    })?;
    token.parse().map_err(|_| IoError::ParseError {
        message: format!("invalid {} '{}'", what, token),
    })
}

/// Mean of the unit normals of each vertex's incident faces. Vertices that no
/// face references get a zero vector.
fn averaged_face_normals(vertices: &[Point3f], faces: &[[usize; 3]]) -> Vec<Vector3f> {
    let mut sums = vec![Vector3f::zeros(); vertices.len()];
    let mut counts = vec![0usize; vertices.len()];

    for f in faces {
        let e1 = vertices[f[1]] - vertices[f[0]];
        let e2 = vertices[f[2]] - vertices[f[0]];
        let n = e1.cross(&e2).normalize();
        for &vi in f {
            sums[vi] += n;
            counts[vi] += 1;
        }
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| if count == 0 { sum } else { sum / count as f32 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TETRAHEDRON: &str = "OFF
4 4 6
0.0 0.0 0.0
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
";

    #[test]
    fn test_parse_tetrahedron() {
        let mesh = OffReader::parse_str(TETRAHEDRON).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.faces[0], [0, 2, 1]);
        assert_eq!(mesh.index_buffer().len(), 12);
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.uvs.len(), 4);
        assert_eq!(mesh.bounding_box.min, Point3f::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.bounding_box.max, Point3f::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_averaged_normals() {
        let mesh = OffReader::parse_str(TETRAHEDRON).unwrap();
        // Vertex 1 touches faces with normals -z, -y and the slanted face
        let slanted = Vector3f::new(1.0, 1.0, 1.0).normalize();
        let expected = (Vector3f::new(0.0, 0.0, -1.0) + Vector3f::new(0.0, -1.0, 0.0) + slanted) / 3.0;
        assert_relative_eq!(mesh.normals[1], expected, epsilon = 1e-6);
    }

    #[test]
    fn test_header_and_counts_on_one_line_with_comments() {
        let content = "OFF 3 1 0 # counts\n# a comment line\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
        let mesh = OffReader::parse_str(content).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert_relative_eq!(mesh.normals[0], Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_missing_header() {
        let content = "3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
        let result = OffReader::parse_str(content);
        assert!(matches!(result, Err(IoError::InvalidFormat { .. })));
        assert!(matches!(OffReader::parse_str(""), Err(IoError::InvalidFormat { .. })));
    }

    #[test]
    fn test_oversized_header_counts() {
        let result = OffReader::parse_str("OFF\n1000000000000000000 0 0\n0 0 0\n");
        assert!(matches!(result, Err(IoError::ParseError { .. })));

        let result = OffReader::parse_str("OFF\n3 18446744073709551615 0\n0 0 0\n1 0 0\n0 1 0\n");
        assert!(matches!(result, Err(IoError::ParseError { .. })));
    }

    #[test]
    fn test_non_triangle_face() {
        let content = "OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        let result = OffReader::parse_str(content);
        assert!(matches!(result, Err(IoError::ParseError { .. })));
    }

    #[test]
    fn test_truncated_and_malformed_input() {
        assert!(OffReader::parse_str("OFF\n3 1 0\n0 0 0\n1 0 0\n").is_err());
        assert!(OffReader::parse_str("OFF\n1 0 0\n0 zero 0\n").is_err());
        assert!(OffReader::parse_str("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 7\n").is_err());
    }

    #[test]
    fn test_isolated_vertex_has_zero_normal() {
        let content = "OFF\n4 1 0\n0 0 0\n1 0 0\n0 1 0\n5 5 5\n3 0 1 2\n";
        let mesh = OffReader::parse_str(content).unwrap();
        assert_eq!(mesh.normals[3], Vector3f::zeros());
        assert_eq!(mesh.bounding_box.max, Point3f::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_write_then_parse() {
        let mesh = OffReader::parse_str(TETRAHEDRON).unwrap();
        let mut buffer = Vec::new();
        OffWriter::write_to(&mesh, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("OFF\n4 4 0\n"));

        let reloaded = OffReader::parse_str(&text).unwrap();
        assert_eq!(reloaded.vertices, mesh.vertices);
        assert_eq!(reloaded.faces, mesh.faces);
    }
}
