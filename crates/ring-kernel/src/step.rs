//! STEP (ISO 10303-21) output for truck solids.

use truck_modeling::topology::Solid;
use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModels};

use crate::types::KernelError;

/// Value written to the `originating_system` slot of the STEP header.
pub const ORIGINATING_SYSTEM: &str = "ring-kernel";

/// Render solids as one STEP file with a `MANIFOLD_SOLID_BREP` each.
///
/// Every solid must have a single boundary shell; extra shells would be
/// written as voids of the first.
pub fn solids_to_step(solids: &[&Solid], file_name: &str) -> Result<String, KernelError> {
    if solids.is_empty() {
        return Err(KernelError::StepExportFailed {
            reason: "nothing to export".to_string(),
        });
    }
    if let Some(bad) = solids.iter().find(|s| s.boundaries().len() != 1) {
        return Err(KernelError::StepExportFailed {
            reason: format!("solid has {} boundary shells, expected 1", bad.boundaries().len()),
        });
    }
    let compressed: Vec<_> = solids.iter().map(|s| s.compress()).collect();
    let step_string = CompleteStepDisplay::new(
        compressed.iter().collect::<StepModels<_, _, _>>(),
        StepHeaderDescriptor {
            file_name: file_name.to_owned(),
            organization_system: ORIGINATING_SYSTEM.to_owned(),
            ..Default::default()
        },
    )
    .to_string();
    Ok(step_string)
}
