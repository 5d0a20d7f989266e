//! KernelIntrospect implementation on TruckKernel's stored solids.

use crate::tessellation;
use crate::traits::KernelIntrospect;
use crate::truck_kernel::TruckKernel;
use crate::types::*;
use ring_types::Aabb;

impl KernelIntrospect for TruckKernel {
    fn body_count(&self, solid: &KernelSolidHandle) -> usize {
        self.get_bodies(solid).map(|b| b.body_count()).unwrap_or(0)
    }

    fn shell_count(&self, solid: &KernelSolidHandle) -> usize {
        self.get_bodies(solid).map(|b| b.shell_count()).unwrap_or(0)
    }

    fn face_count(&self, solid: &KernelSolidHandle) -> usize {
        self.get_bodies(solid).map(|b| b.face_count()).unwrap_or(0)
    }

    fn bounding_box(&self, solid: &KernelSolidHandle, tolerance: f64) -> Option<Aabb> {
        let bodies = self.get_bodies(solid)?;
        Aabb::from_points(
            bodies
                .shells()
                .flat_map(|shell| tessellation::sample_points(shell, tolerance)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Kernel;

    #[test]
    fn test_sphere_introspection() {
        let mut kernel = TruckKernel::new();
        let sphere = kernel.make_sphere(2.0).unwrap();

        assert_eq!(kernel.body_count(&sphere), 1);
        assert_eq!(kernel.shell_count(&sphere), 1);
        assert!(kernel.face_count(&sphere) >= 1);

        let bbox = kernel.bounding_box(&sphere, 0.01).unwrap();
        for extent in bbox.size() {
            assert!((extent - 4.0).abs() < 0.05, "sphere extent {} != 4", extent);
        }
    }

    #[test]
    fn test_unknown_handle_has_no_bodies() {
        let kernel = TruckKernel::new();
        let bogus = KernelSolidHandle(7);
        assert_eq!(kernel.body_count(&bogus), 0);
        assert_eq!(kernel.shell_count(&bogus), 0);
        assert_eq!(kernel.face_count(&bogus), 0);
    }
}
