use ring_kernel::KernelSolidHandle;
use tracing::debug;

use crate::kernel_ext::KernelBundle;
use crate::layout::RingLayout;
use crate::types::BuildError;

/// Sphere of the stone radius lifted to its seated height on the ring axis.
pub fn build_stone(
    kb: &mut dyn KernelBundle,
    layout: &RingLayout,
) -> Result<KernelSolidHandle, BuildError> {
    debug!(
        radius = layout.stone_radius,
        center_z = layout.stone_center_z,
        "building stone"
    );
    let sphere = kb
        .make_sphere(layout.stone_radius)
        .map_err(BuildError::at("stone"))?;
    kb.translate(&sphere, [0.0, 0.0, layout.stone_center_z])
        .map_err(BuildError::at("stone placement"))
}
