//! RingModelBuilder: turns a RingSpec into one solid.

use std::time::Instant;

use ring_types::RingSpec;
use tracing::{info, instrument, warn};

use crate::band::build_band;
use crate::kernel_ext::KernelBundle;
use crate::layout::RingLayout;
use crate::prongs::build_prongs;
use crate::size_table::SizeTable;
use crate::stone::build_stone;
use crate::types::{BuildError, Diagnostics, RingModel};

/// Builds band + stone + prongs and unions them.
///
/// Holds only the size table; each build is an independent, deterministic
/// function of its input.
#[derive(Debug, Clone, Default)]
pub struct RingModelBuilder {
    sizes: SizeTable,
}

impl RingModelBuilder {
    pub fn new(sizes: SizeTable) -> Self {
        Self { sizes }
    }

    pub fn sizes(&self) -> &SizeTable {
        &self.sizes
    }

    /// Derive the layout for `spec` without touching a kernel.
    pub fn layout(&self, spec: &RingSpec) -> Result<RingLayout, BuildError> {
        RingLayout::compute(spec, &self.sizes)
    }

    /// Build the ring solid in `kb`.
    ///
    /// Validation happens before the first kernel call. On error nothing is
    /// returned; intermediate solids stay unreferenced in the kernel.
    #[instrument(skip_all, fields(size = %spec.ring_size_code))]
    pub fn build(
        &self,
        kb: &mut dyn KernelBundle,
        spec: &RingSpec,
        description: impl Into<String>,
    ) -> Result<RingModel, BuildError> {
        let layout = self.layout(spec)?;
        let started = Instant::now();

        let band = build_band(kb, &layout)?;
        let stone = build_stone(kb, &layout)?;
        let prongs = build_prongs(kb, &layout)?;

        let band_stone = kb
            .boolean_union(&band, &stone)
            .map_err(BuildError::at("band + stone union"))?;
        let solid = kb
            .boolean_union(&band_stone, &prongs)
            .map_err(BuildError::at("prong union"))?;

        let introspect = kb.as_introspect();
        let mut diagnostics = Diagnostics {
            body_count: introspect.body_count(&solid),
            shell_count: introspect.shell_count(&solid),
            face_count: introspect.face_count(&solid),
            warnings: Vec::new(),
            kernel_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        if diagnostics.body_count > 1 {
            diagnostics.warnings.push(format!(
                "result has {} disconnected bodies; stone and prongs do not touch the band",
                diagnostics.body_count
            ));
        }
        if diagnostics.shell_count > diagnostics.body_count {
            diagnostics.warnings.push(format!(
                "{} overlapping shells could not be fused and are exported side by side",
                diagnostics.shell_count - diagnostics.body_count
            ));
        }
        for msg in &diagnostics.warnings {
            warn!("{}", msg);
        }

        info!(
            bodies = diagnostics.body_count,
            shells = diagnostics.shell_count,
            faces = diagnostics.face_count,
            kernel_ms = diagnostics.kernel_time_ms,
            "ring built"
        );

        Ok(RingModel {
            solid,
            notes: description.into(),
            spec: spec.clone(),
            layout,
            diagnostics,
        })
    }
}
