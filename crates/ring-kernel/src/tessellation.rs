//! Tessellation of truck solids into a flat triangle mesh.

use crate::types::*;
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a TriMesh.
///
/// Faces are meshed individually so reversed faces can be flipped before
/// their triangles are appended.
pub fn tessellate_solid(solid: &TruckSolid, tolerance: f64) -> Result<TriMesh, KernelError> {
    if tolerance <= 0.0 {
        return Err(KernelError::InvalidParameter {
            reason: format!("tessellation tolerance {} must be positive", tolerance),
        });
    }
    let meshed_solid = solid.triangulation(tolerance);
    let mut mesh = TriMesh::default();

    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(face_mesh) = maybe_mesh else {
                continue;
            };
            let face_mesh = if !face.orientation() {
                let mut m = face_mesh;
                m.invert();
                m
            } else {
                face_mesh
            };
            append_polygon_mesh(&mut mesh, &face_mesh);
        }
    }

    // Per-face meshing can come back empty; retry as one merged polygon.
    if mesh.is_empty() {
        let merged = meshed_solid.to_polygon();
        append_polygon_mesh(&mut mesh, &merged);
    }

    if mesh.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid produced no triangles".to_string(),
        });
    }
    mesh.validate()?;
    Ok(mesh)
}

/// Append a truck PolygonMesh. Quads and larger polygons are fanned from
/// their first vertex; truck only emits convex n-gons here.
fn append_polygon_mesh(mesh: &mut TriMesh, poly: &PolygonMesh) {
    let base_vertex = mesh.vertex_count() as u32;

    for pos in poly.positions() {
        mesh.vertices.push(pos[0] as f32);
        mesh.vertices.push(pos[1] as f32);
        mesh.vertices.push(pos[2] as f32);
    }

    for face in poly.face_iter() {
        let Some((first, rest)) = face.split_first() else {
            continue;
        };
        for pair in rest.windows(2) {
            for v in [first, &pair[0], &pair[1]] {
                mesh.indices.push(v.pos as u32 + base_vertex);
            }
        }
    }
}

/// Vertex positions of the whole solid at `tolerance`, for bounding queries.
pub fn sample_points(solid: &TruckSolid, tolerance: f64) -> Vec<[f64; 3]> {
    solid
        .triangulation(tolerance)
        .to_polygon()
        .positions()
        .iter()
        .map(|p| [p[0], p[1], p[2]])
        .collect()
}
