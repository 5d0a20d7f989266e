use crate::types::*;
use ring_types::Aabb;

/// Core geometry kernel trait: shape construction, composition and export.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
pub trait Kernel {
    /// Create a planar face bounded by a closed polygon.
    fn make_planar_face(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError>;

    /// Revolve a planar face around an axis. The face is consumed.
    fn revolve_face(
        &mut self,
        face: KernelId,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Sphere centered at the origin.
    fn make_sphere(&mut self, radius: f64) -> Result<KernelSolidHandle, KernelError>;

    /// Cylinder along +Z, centered at the origin (spans `-height/2..height/2`).
    fn make_cylinder(&mut self, radius: f64, height: f64)
        -> Result<KernelSolidHandle, KernelError>;

    /// Copy of `solid` moved by `offset`.
    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean union of two solids.
    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<TriMesh, KernelError>;

    /// Serialize a solid as a STEP exchange file.
    fn export_step(
        &mut self,
        solid: &KernelSolidHandle,
        file_name: &str,
    ) -> Result<String, KernelError>;
}

/// Read-only queries on kernel solids.
pub trait KernelIntrospect {
    /// Number of disconnected bodies in a solid.
    fn body_count(&self, solid: &KernelSolidHandle) -> usize;

    /// Number of closed shells. Exceeds `body_count` when overlapping parts
    /// could not be fused and are carried as separate shells of one body.
    fn shell_count(&self, solid: &KernelSolidHandle) -> usize;

    /// Number of boundary faces across all shells.
    fn face_count(&self, solid: &KernelSolidHandle) -> usize;

    /// Bounding box of the solid, sampled at `tolerance`. `None` for unknown handles.
    fn bounding_box(&self, solid: &KernelSolidHandle, tolerance: f64) -> Option<Aabb>;
}
