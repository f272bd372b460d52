//! STL bone loading

use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::bone::{BoneKind, BoneMesh};
use crate::constants::STL_VERTEX_PRECISION;

/// Load a bone mesh from an STL file (binary or ASCII)
pub fn load_stl(path: impl AsRef<Path>, kind: BoneKind) -> Result<BoneMesh, StlError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| StlError::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string();

    let mut mesh = read_bone(&mut reader, kind, name)?;
    mesh.source = Some(path.to_string_lossy().to_string());

    tracing::info!(
        "Loaded {} from {:?}: {} vertices, {} triangles",
        kind.name(),
        path,
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Load a bone mesh from in-memory STL data
pub fn load_stl_from_bytes(name: &str, data: &[u8], kind: BoneKind) -> Result<BoneMesh, StlError> {
    let mut cursor = Cursor::new(data);
    let mesh = read_bone(&mut cursor, kind, name.to_string())?;

    tracing::info!(
        "Loaded {} from bytes '{}': {} vertices, {} triangles",
        kind.name(),
        name,
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

fn read_bone<R: Read + Seek>(
    reader: &mut R,
    kind: BoneKind,
    name: String,
) -> Result<BoneMesh, StlError> {
    let stl = stl_io::read_stl(reader).map_err(|e| StlError::Parse(e.to_string()))?;
    if stl.faces.is_empty() {
        return Err(StlError::EmptyMesh(name));
    }

    let (vertices, normals, indices) = index_mesh(&stl);

    let mut mesh = BoneMesh::new(kind, name);
    mesh.vertices = vertices;
    mesh.normals = normals;
    mesh.indices = indices;
    mesh.calculate_bounding_box();
    Ok(mesh)
}

/// Collapse the STL triangle soup into shared vertices
fn index_mesh(stl: &stl_io::IndexedMesh) -> (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<u32>) {
    let mut unique_vertices: Vec<[f32; 3]> = Vec::new();
    let mut vertex_map: HashMap<[i32; 3], u32> = HashMap::new();
    let mut normals = Vec::with_capacity(stl.faces.len());
    let mut indices = Vec::with_capacity(stl.faces.len() * 3);

    for face in &stl.faces {
        let corners = face.vertices.map(|i| {
            let v = stl.vertices[i];
            [v[0], v[1], v[2]]
        });

        let n = face.normal;
        normals.push(face_normal([n[0], n[1], n[2]], &corners));

        for v in corners {
            let key = [
                (v[0] * STL_VERTEX_PRECISION).round() as i32,
                (v[1] * STL_VERTEX_PRECISION).round() as i32,
                (v[2] * STL_VERTEX_PRECISION).round() as i32,
            ];
            let index = *vertex_map.entry(key).or_insert_with(|| {
                unique_vertices.push(v);
                (unique_vertices.len() - 1) as u32
            });
            indices.push(index);
        }
    }

    (unique_vertices, normals, indices)
}

/// Stored facet normal, or the winding normal when the file carries a zero normal
fn face_normal(stored: [f32; 3], corners: &[[f32; 3]; 3]) -> [f32; 3] {
    let n = glam::Vec3::from(stored);
    if n.length_squared() > 1e-12 {
        return n.normalize().to_array();
    }
    let [a, b, c] = corners.map(glam::Vec3::from);
    let computed = (b - a).cross(c - a).normalize_or_zero();
    if computed == glam::Vec3::ZERO {
        [0.0, 0.0, 1.0]
    } else {
        computed.to_array()
    }
}

/// STL-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StlError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("STL '{0}' contains no triangles")]
    EmptyMesh(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(v: [[f32; 3]; 3], n: [f32; 3]) -> stl_io::Triangle {
        stl_io::Triangle {
            normal: stl_io::Normal::new(n),
            vertices: v.map(stl_io::Vertex::new),
        }
    }

    fn quad_triangles() -> Vec<stl_io::Triangle> {
        vec![
            triangle(
                [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
                [0.0, 0.0, 1.0],
            ),
            triangle(
                [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
                [0.0, 0.0, 0.0],
            ),
        ]
    }

    fn quad_bytes() -> Vec<u8> {
        let mut data = Vec::new();
        stl_io::write_stl(&mut data, quad_triangles().iter()).unwrap();
        data
    }

    #[test]
    fn test_load_from_bytes_shares_vertices() {
        let mesh = load_stl_from_bytes("quad", &quad_bytes(), BoneKind::Femur).unwrap();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.normals.len(), 2);
        assert_eq!(mesh.bbox_min, [0.0, 0.0, 0.0]);
        assert_eq!(mesh.bbox_max, [1.0, 1.0, 0.0]);
        assert_eq!(mesh.kind, BoneKind::Femur);
    }

    #[test]
    fn test_zero_normal_is_recomputed() {
        let mesh = load_stl_from_bytes("quad", &quad_bytes(), BoneKind::Tibia).unwrap();
        assert_eq!(mesh.normals[1], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Right_Tibia.stl");
        std::fs::write(&path, quad_bytes()).unwrap();

        let mesh = load_stl(&path, BoneKind::Tibia).unwrap();

        assert_eq!(mesh.name, "Right_Tibia");
        assert_eq!(mesh.source.as_deref(), Some(path.to_string_lossy().as_ref()));
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_stl(dir.path().join("missing.stl"), BoneKind::Femur).unwrap_err();
        assert!(matches!(err, StlError::Io(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = load_stl_from_bytes("junk", b"not an stl", BoneKind::Femur).unwrap_err();
        assert!(matches!(err, StlError::Parse(_) | StlError::EmptyMesh(_)));
    }
}
