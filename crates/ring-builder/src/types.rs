use ring_kernel::{KernelError, KernelSolidHandle};
use ring_types::RingSpec;
use serde::Serialize;

use crate::layout::RingLayout;

/// Output of a successful build: the solid plus provenance.
///
/// The solid lives inside the kernel that built it; hand the model to the
/// exporter together with that same kernel.
#[derive(Debug, Clone)]
pub struct RingModel {
    /// Handle to the final solid. Runtime-only, not persisted.
    pub solid: KernelSolidHandle,
    /// Free-text description carried through unchanged.
    pub notes: String,
    /// The input the model was built from.
    pub spec: RingSpec,
    /// Every derived dimension and placement used during construction.
    pub layout: RingLayout,
    pub diagnostics: Diagnostics,
}

/// Non-fatal observations about a build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    /// Connected bodies in the final solid. 1 means a single piece.
    pub body_count: usize,
    /// Closed shells in the final solid. Above `body_count` when the kernel
    /// kept overlapping parts unfused.
    pub shell_count: usize,
    /// Boundary faces in the final solid.
    pub face_count: usize,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Time spent in kernel calls, in milliseconds.
    pub kernel_time_ms: f64,
}

/// Errors from building a ring. Every variant aborts the build.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error("ring size '{code}' not supported; use one of: {}", .valid.join(", "))]
    UnsupportedSize { code: String, valid: Vec<String> },

    #[error("{field} must be a positive length in mm, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("geometry construction failed at {stage}: {source}")]
    GeometryConstruction {
        stage: String,
        #[source]
        source: KernelError,
    },
}

impl BuildError {
    /// Adapter for `map_err` that tags a kernel failure with the build stage.
    pub fn at(stage: impl Into<String>) -> impl FnOnce(KernelError) -> BuildError {
        let stage = stage.into();
        move |source| BuildError::GeometryConstruction { stage, source }
    }
}
