use ring_kernel::KernelSolidHandle;
use tracing::debug;

use crate::kernel_ext::KernelBundle;
use crate::layout::RingLayout;
use crate::types::BuildError;

/// Build every prong and fold them into one solid.
///
/// Returns only once all prongs are unioned; any failure discards the
/// partial result.
pub fn build_prongs(
    kb: &mut dyn KernelBundle,
    layout: &RingLayout,
) -> Result<KernelSolidHandle, BuildError> {
    let mut running: Option<KernelSolidHandle> = None;

    for (i, placement) in layout.prongs.iter().enumerate() {
        let stage = format!("prong {}", i + 1);
        debug!(
            index = i,
            angle_deg = placement.angle_degrees(),
            x = placement.offset[0],
            y = placement.offset[1],
            "placing prong"
        );
        let cylinder = kb
            .make_cylinder(layout.prong_radius, layout.prong_height)
            .map_err(BuildError::at(stage.as_str()))?;
        let prong = kb
            .translate(&cylinder, placement.offset)
            .map_err(BuildError::at(stage.as_str()))?;

        running = Some(match running {
            None => prong,
            Some(acc) => kb
                .boolean_union(&acc, &prong)
                .map_err(BuildError::at(format!("{} union", stage)))?,
        });
    }

    running.ok_or_else(|| BuildError::GeometryConstruction {
        stage: "prongs".to_string(),
        source: ring_kernel::KernelError::InvalidParameter {
            reason: "layout has no prongs".to_string(),
        },
    })
}
