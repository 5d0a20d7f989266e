use std::f64::consts::TAU;

use ring_kernel::KernelSolidHandle;
use tracing::debug;

use crate::kernel_ext::KernelBundle;
use crate::layout::RingLayout;
use crate::types::BuildError;

/// Revolve the band cross-section a full turn around the ring axis.
pub fn build_band(
    kb: &mut dyn KernelBundle,
    layout: &RingLayout,
) -> Result<KernelSolidHandle, BuildError> {
    debug!(
        inner_radius = layout.inner_radius,
        outer_radius = layout.outer_radius,
        width = layout.band_width,
        "building band"
    );
    let face = kb
        .make_planar_face(&layout.band_profile())
        .map_err(BuildError::at("band profile"))?;
    kb.revolve_face(face, [0.0, 0.0, 0.0], [0.0, 0.0, 1.0], TAU)
        .map_err(BuildError::at("band revolve"))
}
