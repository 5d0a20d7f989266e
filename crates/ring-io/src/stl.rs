//! STL export from TriMesh, binary or ASCII.

use ring_kernel::TriMesh;

use crate::errors::ExportError;

/// Face normal from the triangle winding; degenerate triangles get +Z.
fn facet_normal(tri: &[[f32; 3]; 3]) -> [f32; 3] {
    let [v0, v1, v2] = tri;
    let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
    let n = [
        e1[1] * e2[2] - e1[2] * e2[1],
        e1[2] * e2[0] - e1[0] * e2[2],
        e1[0] * e2[1] - e1[1] * e2[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

fn check_mesh(mesh: &TriMesh) -> Result<(), ExportError> {
    if mesh.is_empty() {
        return Err(ExportError::Stl {
            reason: "mesh has no triangles".to_string(),
        });
    }
    mesh.validate().map_err(|e| ExportError::Stl {
        reason: e.to_string(),
    })
}

/// Binary STL:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
pub fn to_binary_stl(mesh: &TriMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    check_mesh(mesh)?;
    let tri_count = mesh.triangle_count();
    let mut buf = Vec::with_capacity(84 + tri_count * 50);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());

    for tri in mesh.triangles() {
        for c in facet_normal(&tri) {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for v in &tri {
            for c in v {
                buf.extend_from_slice(&c.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// ASCII STL as a string.
pub fn to_ascii_stl(mesh: &TriMesh, name: &str) -> Result<String, ExportError> {
    check_mesh(mesh)?;
    let mut out = String::with_capacity(mesh.triangle_count() * 300);
    out.push_str(&format!("solid {}\n", name));

    for tri in mesh.triangles() {
        let [nx, ny, nz] = facet_normal(&tri);
        out.push_str(&format!("  facet normal {} {} {}\n", nx, ny, nz));
        out.push_str("    outer loop\n");
        for v in &tri {
            out.push_str(&format!("      vertex {} {} {}\n", v[0], v[1], v[2]));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {}\n", name));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriMesh {
        TriMesh {
            vertices: vec![
                0.0, 0.0, 0.0, // v0
                1.0, 0.0, 0.0, // v1
                1.0, 1.0, 0.0, // v2
                0.0, 1.0, 0.0, // v3
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn binary_layout() {
        let stl = to_binary_stl(&quad(), "ring").unwrap();
        // 84 header + 2 * 50 = 184
        assert_eq!(stl.len(), 184);
        assert!(stl.starts_with(b"binary STL: ring"));
        assert_eq!(u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]), 2);

        // Normal should be (0, 0, 1), the cross product of (1,0,0)×(1,1,0)
        let nz = f32::from_le_bytes([stl[92], stl[93], stl[94], stl[95]]);
        assert!((nz - 1.0).abs() < 1e-6);
    }

    #[test]
    fn long_names_are_truncated_in_header() {
        let name = "x".repeat(200);
        let stl = to_binary_stl(&quad(), &name).unwrap();
        assert_eq!(stl.len(), 184);
    }

    #[test]
    fn ascii_layout() {
        let stl = to_ascii_stl(&quad(), "ring").unwrap();
        assert!(stl.starts_with("solid ring\n"));
        assert!(stl.ends_with("endsolid ring\n"));
        assert_eq!(stl.matches("facet normal").count(), 2);
        assert_eq!(stl.matches("vertex").count(), 6);
    }

    #[test]
    fn empty_mesh_rejected() {
        let mesh = TriMesh::default();
        assert!(matches!(
            to_binary_stl(&mesh, "x"),
            Err(ExportError::Stl { .. })
        ));
        assert!(to_ascii_stl(&mesh, "x").is_err());
    }

    #[test]
    fn bad_index_rejected() {
        let mut mesh = quad();
        mesh.indices[4] = 9;
        assert!(to_binary_stl(&mesh, "x").is_err());
    }
}
