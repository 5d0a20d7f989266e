use ring_types::Aabb;
use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// NEVER persisted. Valid only for the kernel instance that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Transient kernel-internal entity identifier (used for standalone faces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KernelId(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("invalid profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("STEP export failed: {reason}")]
    StepExportFailed { reason: String },

    #[error("entity not found: {id:?}")]
    EntityNotFound { id: KernelId },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },
}

impl KernelError {
    pub(crate) fn missing_solid(handle: &KernelSolidHandle) -> Self {
        KernelError::EntityNotFound {
            id: KernelId(handle.id()),
        }
    }
}

/// Triangulated surface of a solid, ready for mesh export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Triangle indices into the vertex array, three per triangle.
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `index`, or `None` past the end of the vertex array.
    pub fn vertex(&self, index: u32) -> Option<[f32; 3]> {
        let i = index as usize * 3;
        match self.vertices.get(i..i + 3)? {
            &[x, y, z] => Some([x, y, z]),
            _ => None,
        }
    }

    /// Iterate triangles as vertex triples.
    ///
    /// Triangles with an out-of-range index are skipped. Run [`TriMesh::validate`]
    /// first when a dangling index must be an error rather than a gap.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([self.vertex(tri[0])?, self.vertex(tri[1])?, self.vertex(tri[2])?])
        })
    }

    /// Append `other`, offsetting its indices past this mesh's vertices.
    pub fn extend_from(&mut self, other: &TriMesh) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|&i| i + base));
    }

    /// Check that every index refers to an existing vertex.
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.indices.len() % 3 != 0 {
            return Err(KernelError::TessellationFailed {
                reason: format!("index count {} is not a multiple of 3", self.indices.len()),
            });
        }
        let vertex_count = self.vertex_count();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(KernelError::TessellationFailed {
                reason: format!("index {} out of range (vertex count = {})", bad, vertex_count),
            });
        }
        Ok(())
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.vertices
                .chunks_exact(3)
                .map(|c| [c[0] as f64, c[1] as f64, c[2] as f64]),
        )
    }

    /// Signed volume via the divergence theorem. Only meaningful for closed,
    /// validated meshes.
    pub fn volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (to_f64(a), to_f64(b), to_f64(c));
                a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
                    + a[2] * (b[0] * c[1] - b[1] * c[0])
            })
            .sum::<f64>()
            / 6.0
    }
}

fn to_f64(p: [f32; 3]) -> [f64; 3] {
    [p[0] as f64, p[1] as f64, p[2] as f64]
}
