//! TruckKernel: real geometry kernel wrapping truck's API.

use crate::bodies::Bodies;
use crate::primitives;
use crate::step;
use crate::tessellation;
use crate::traits::Kernel;
use crate::types::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

// Import truck types selectively to avoid shadowing std::result::Result
use truck_modeling::topology::{Face, Solid};
use truck_modeling::{InnerSpace, Point3, Vector3};

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    next_id: u64,
    solids: HashMap<u64, Bodies>,
    /// Standalone faces created by make_planar_face, awaiting revolve.
    standalone_faces: HashMap<u64, Face>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            next_id: 1,
            solids: HashMap::new(),
            standalone_faces: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn store_bodies(&mut self, bodies: Bodies) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), bodies);
        handle
    }

    fn store_solid(&mut self, solid: Solid) -> Result<KernelSolidHandle, KernelError> {
        Ok(self.store_bodies(Bodies::from_solid(solid)?))
    }

    pub(crate) fn get_bodies(&self, handle: &KernelSolidHandle) -> Option<&Bodies> {
        self.solids.get(&handle.id())
    }

    fn bodies(&self, handle: &KernelSolidHandle) -> Result<&Bodies, KernelError> {
        self.get_bodies(handle)
            .ok_or_else(|| KernelError::missing_solid(handle))
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn make_planar_face(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError> {
        let pts: Vec<Point3> = points
            .iter()
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect();
        let face = primitives::make_polygon_face(&pts)?;
        let id = self.alloc_id();
        self.standalone_faces.insert(id.0, face);
        Ok(id)
    }

    #[instrument(skip(self))]
    fn revolve_face(
        &mut self,
        face: KernelId,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        let truck_face = self
            .standalone_faces
            .remove(&face.0)
            .ok_or(KernelError::EntityNotFound { id: face })?;

        let origin = Point3::new(axis_origin[0], axis_origin[1], axis_origin[2]);
        let axis = Vector3::new(axis_direction[0], axis_direction[1], axis_direction[2]);
        if axis.magnitude() < 1e-12 {
            return Err(KernelError::InvalidParameter {
                reason: "revolve axis has zero length".to_string(),
            });
        }

        let solid = primitives::revolve(&truck_face, origin, axis, angle);
        self.store_solid(solid)
    }

    fn make_sphere(&mut self, radius: f64) -> Result<KernelSolidHandle, KernelError> {
        let solid = primitives::make_sphere(radius)?;
        self.store_solid(solid)
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid = primitives::make_cylinder(radius, height)?;
        self.store_solid(solid)
    }

    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        let moved = self
            .bodies(solid)?
            .translated(Vector3::new(offset[0], offset[1], offset[2]));
        Ok(self.store_bodies(moved))
    }

    #[instrument(skip(self))]
    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let result = self.bodies(a)?.union(self.bodies(b)?)?;
        debug!(
            bodies = result.body_count(),
            shells = result.shell_count(),
            "union complete"
        );
        Ok(self.store_bodies(result))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<TriMesh, KernelError> {
        let mut mesh = TriMesh::default();
        for shell in self.bodies(solid)?.shells() {
            mesh.extend_from(&tessellation::tessellate_solid(shell, tolerance)?);
        }
        Ok(mesh)
    }

    fn export_step(
        &mut self,
        solid: &KernelSolidHandle,
        file_name: &str,
    ) -> Result<String, KernelError> {
        let shells: Vec<&Solid> = self.bodies(solid)?.shells().collect();
        step::solids_to_step(&shells, file_name)
    }
}
