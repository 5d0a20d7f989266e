//! MockKernel: deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Every body is approximated by axis-aligned boxes: one per primitive, or a
//! ring of sector boxes for a revolved annulus so the finger hole stays
//! open. Unions merge bodies whose boxes touch, which is enough to reason
//! about connectivity without a real B-rep. Each call is logged so tests can
//! assert on what the caller asked the kernel to do (and on what it never
//! asked).

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;
use ring_types::Aabb;
use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

/// Sector boxes per revolved annulus. A multiple of 4, so the cardinal
/// directions fall on sector edges and the outer extent is exact.
pub const REVOLVE_SECTORS: usize = 16;

/// A recorded kernel invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelCall {
    MakePlanarFace { points: Vec<[f64; 3]> },
    RevolveFace { axis_direction: [f64; 3], angle: f64 },
    MakeSphere { radius: f64 },
    MakeCylinder { radius: f64, height: f64 },
    Translate { offset: [f64; 3] },
    BooleanUnion,
    Tessellate { tolerance: f64 },
    ExportStep { file_name: String },
}

/// Operation selector for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    PlanarFace,
    Revolve,
    Sphere,
    Cylinder,
    Translate,
    Union,
    Tessellate,
    StepExport,
}

#[derive(Debug, Clone)]
struct MockBody {
    boxes: Vec<Aabb>,
    shells: usize,
}

impl MockBody {
    fn single(b: Aabb) -> Self {
        Self {
            boxes: vec![b],
            shells: 1,
        }
    }

    fn touches(&self, other: &MockBody) -> bool {
        self.boxes
            .iter()
            .any(|a| other.boxes.iter().any(|b| a.intersects(b)))
    }

    fn translated(&self, offset: [f64; 3]) -> Self {
        Self {
            boxes: self.boxes.iter().map(|b| b.translated(offset)).collect(),
            shells: self.shells,
        }
    }
}

#[derive(Debug, Clone)]
struct MockSolid {
    bodies: Vec<MockBody>,
    faces: usize,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    standalone_faces: HashMap<u64, Vec<[f64; 3]>>,
    calls: Vec<KernelCall>,
    failures: HashSet<MockOp>,
    fuse_touching: bool,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
            standalone_faces: HashMap::new(),
            calls: Vec::new(),
            failures: HashSet::new(),
            fuse_touching: true,
        }
    }

    /// Keep touching bodies as separate shells of one body on union, the way
    /// TruckKernel does when truck cannot fuse them.
    pub fn without_fusing(mut self) -> Self {
        self.fuse_touching = false;
        self
    }

    /// Make every subsequent call of `op` fail.
    pub fn fail_on(&mut self, op: MockOp) {
        self.failures.insert(op);
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> &[KernelCall] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    fn check(&self, op: MockOp) -> Result<(), KernelError> {
        if self.failures.contains(&op) {
            return Err(KernelError::NotSupported {
                operation: format!("{:?} (injected failure)", op),
            });
        }
        Ok(())
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn store(&mut self, solid: MockSolid) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(h.id(), solid);
        h
    }

    fn get(&self, handle: &KernelSolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::missing_solid(handle))
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Group bodies into connected clusters, one merged body per cluster.
fn merge_bodies(mut pending: Vec<MockBody>, fuse: bool) -> Vec<MockBody> {
    let mut merged = Vec::new();
    while let Some(mut current) = pending.pop() {
        // Absorb until no remaining body touches the grown cluster.
        loop {
            let (touching, rest): (Vec<_>, Vec<_>) =
                pending.into_iter().partition(|b| current.touches(b));
            pending = rest;
            if touching.is_empty() {
                break;
            }
            for body in touching {
                current.boxes.extend(body.boxes);
                current.shells = if fuse { 1 } else { current.shells + body.shells };
            }
        }
        merged.push(current);
    }
    merged
}

/// Boxes covering a full revolution of a profile spanning `r_in..r_out`
/// radially. A profile touching the axis gives a single box.
fn revolved_boxes(r_in: f64, r_out: f64, z0: f64, z1: f64) -> Vec<Aabb> {
    if r_in <= 0.0 {
        return vec![Aabb::new([-r_out, -r_out, z0], [r_out, r_out, z1])];
    }
    (0..REVOLVE_SECTORS)
        .map(|k| {
            let a0 = k as f64 * TAU / REVOLVE_SECTORS as f64;
            let a1 = (k + 1) as f64 * TAU / REVOLVE_SECTORS as f64;
            let mut lo = [f64::MAX; 2];
            let mut hi = [f64::MIN; 2];
            for (r, a) in [(r_in, a0), (r_in, a1), (r_out, a0), (r_out, a1)] {
                for (i, c) in [r * a.cos(), r * a.sin()].into_iter().enumerate() {
                    lo[i] = lo[i].min(c);
                    hi[i] = hi[i].max(c);
                }
            }
            Aabb::new([lo[0], lo[1], z0], [hi[0], hi[1], z1])
        })
        .collect()
}

fn box_triangles(mesh: &mut TriMesh, b: &Aabb) {
    let base = mesh.vertex_count() as u32;
    for i in 0..8 {
        let x = if i & 1 == 0 { b.min[0] } else { b.max[0] };
        let y = if i & 2 == 0 { b.min[1] } else { b.max[1] };
        let z = if i & 4 == 0 { b.min[2] } else { b.max[2] };
        mesh.vertices.extend([x as f32, y as f32, z as f32]);
    }
    // Outward winding for each of the six faces.
    const QUADS: [[u32; 4]; 6] = [
        [0, 2, 3, 1],
        [4, 5, 7, 6],
        [0, 1, 5, 4],
        [2, 6, 7, 3],
        [0, 4, 6, 2],
        [1, 3, 7, 5],
    ];
    for q in QUADS {
        mesh.indices
            .extend([q[0], q[1], q[2], q[0], q[2], q[3]].map(|k| base + k));
    }
}

impl Kernel for MockKernel {
    fn make_planar_face(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError> {
        self.calls.push(KernelCall::MakePlanarFace {
            points: points.to_vec(),
        });
        self.check(MockOp::PlanarFace)?;
        if points.len() < 3 {
            return Err(KernelError::InvalidProfile {
                reason: format!("profile has {} points, need at least 3", points.len()),
            });
        }
        let id = self.alloc_id();
        self.standalone_faces.insert(id.0, points.to_vec());
        Ok(id)
    }

    fn revolve_face(
        &mut self,
        face: KernelId,
        _axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.calls.push(KernelCall::RevolveFace {
            axis_direction,
            angle,
        });
        self.check(MockOp::Revolve)?;
        let points = self
            .standalone_faces
            .remove(&face.0)
            .ok_or(KernelError::EntityNotFound { id: face })?;
        if axis_direction[0] != 0.0 || axis_direction[1] != 0.0 || axis_direction[2] == 0.0 {
            return Err(KernelError::NotSupported {
                operation: "mock revolve about a non-Z axis".to_string(),
            });
        }

        let radial = || points.iter().map(|p| (p[0] * p[0] + p[1] * p[1]).sqrt());
        let r_in = radial().fold(f64::MAX, f64::min);
        let r_out = radial().fold(0.0_f64, f64::max);
        let z0 = points.iter().map(|p| p[2]).fold(f64::MAX, f64::min);
        let z1 = points.iter().map(|p| p[2]).fold(f64::MIN, f64::max);
        let faces = points.len();
        Ok(self.store(MockSolid {
            bodies: vec![MockBody {
                boxes: revolved_boxes(r_in, r_out, z0, z1),
                shells: 1,
            }],
            faces,
        }))
    }

    fn make_sphere(&mut self, radius: f64) -> Result<KernelSolidHandle, KernelError> {
        self.calls.push(KernelCall::MakeSphere { radius });
        self.check(MockOp::Sphere)?;
        if radius <= 0.0 {
            return Err(KernelError::InvalidParameter {
                reason: format!("sphere radius {} must be positive", radius),
            });
        }
        Ok(self.store(MockSolid {
            bodies: vec![MockBody::single(Aabb::centered([0.0; 3], [radius; 3]))],
            faces: 1,
        }))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.calls.push(KernelCall::MakeCylinder { radius, height });
        self.check(MockOp::Cylinder)?;
        if radius <= 0.0 || height <= 0.0 {
            return Err(KernelError::InvalidParameter {
                reason: format!("cylinder radius {} height {} must be positive", radius, height),
            });
        }
        Ok(self.store(MockSolid {
            bodies: vec![MockBody::single(Aabb::centered(
                [0.0; 3],
                [radius, radius, height / 2.0],
            ))],
            faces: 3,
        }))
    }

    fn translate(
        &mut self,
        solid: &KernelSolidHandle,
        offset: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        self.calls.push(KernelCall::Translate { offset });
        self.check(MockOp::Translate)?;
        let src = self.get(solid)?;
        let moved = MockSolid {
            bodies: src.bodies.iter().map(|b| b.translated(offset)).collect(),
            faces: src.faces,
        };
        Ok(self.store(moved))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.calls.push(KernelCall::BooleanUnion);
        self.check(MockOp::Union)?;
        let sa = self.get(a)?;
        let sb = self.get(b)?;
        let mut bodies = sa.bodies.clone();
        bodies.extend(sb.bodies.iter().cloned());
        let faces = sa.faces + sb.faces;
        let bodies = merge_bodies(bodies, self.fuse_touching);
        Ok(self.store(MockSolid { bodies, faces }))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<TriMesh, KernelError> {
        self.calls.push(KernelCall::Tessellate { tolerance });
        self.check(MockOp::Tessellate)?;
        let mut mesh = TriMesh::default();
        for b in self.get(solid)?.bodies.iter().flat_map(|body| &body.boxes) {
            box_triangles(&mut mesh, b);
        }
        Ok(mesh)
    }

    fn export_step(
        &mut self,
        solid: &KernelSolidHandle,
        file_name: &str,
    ) -> Result<String, KernelError> {
        self.calls.push(KernelCall::ExportStep {
            file_name: file_name.to_string(),
        });
        self.check(MockOp::StepExport)?;
        let solid = self.get(solid)?;
        let mut out = String::from("ISO-10303-21;\nHEADER;\n");
        out.push_str(&format!("FILE_NAME('{}');\nENDSEC;\nDATA;\n", file_name));
        let boxes = solid.bodies.iter().flat_map(|body| &body.boxes);
        for (i, b) in boxes.enumerate() {
            out.push_str(&format!(
                "#{} = MOCK_BODY(({:?}), ({:?}));\n",
                i + 1,
                b.min,
                b.max
            ));
        }
        out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
        Ok(out)
    }
}

impl KernelIntrospect for MockKernel {
    fn body_count(&self, solid: &KernelSolidHandle) -> usize {
        self.solids
            .get(&solid.id())
            .map(|s| s.bodies.len())
            .unwrap_or(0)
    }

    fn shell_count(&self, solid: &KernelSolidHandle) -> usize {
        self.solids
            .get(&solid.id())
            .map(|s| s.bodies.iter().map(|b| b.shells).sum())
            .unwrap_or(0)
    }

    fn face_count(&self, solid: &KernelSolidHandle) -> usize {
        self.solids.get(&solid.id()).map(|s| s.faces).unwrap_or(0)
    }

    fn bounding_box(&self, solid: &KernelSolidHandle, _tolerance: f64) -> Option<Aabb> {
        let s = self.solids.get(&solid.id())?;
        let mut iter = s.bodies.iter().flat_map(|body| body.boxes.iter());
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }
}
