use chrono::{DateTime, Utc};
use ring_builder::{Diagnostics, RingLayout, RingModel};
use ring_types::RingSpec;
use serde::Serialize;
use uuid::Uuid;

/// Format identifier written into every metadata sidecar.
pub const METADATA_FORMAT: &str = "ring-export";
/// Current sidecar format version.
pub const METADATA_VERSION: u32 = 1;

/// JSON sidecar written next to the STL and STEP files.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub format: String,
    pub version: u32,
    /// Unique id for this export run.
    pub id: Uuid,
    /// Base name shared by all exported files.
    pub name: String,
    pub created: DateTime<Utc>,
    /// Free-text design description, unchanged from the input.
    pub notes: String,
    pub spec: RingSpec,
    pub layout: RingLayout,
    pub diagnostics: Diagnostics,
    pub triangle_count: usize,
    /// File names (not paths) of the exported artifacts.
    pub files: ExportedFiles,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFiles {
    pub stl: String,
    pub step: String,
}

impl ExportMetadata {
    /// Describe `model` exported under `name` with a fresh id and timestamp.
    pub fn new(name: impl Into<String>, model: &RingModel, triangle_count: usize) -> Self {
        let name = name.into();
        Self {
            format: METADATA_FORMAT.to_string(),
            version: METADATA_VERSION,
            id: Uuid::new_v4(),
            files: ExportedFiles {
                stl: format!("{name}.stl"),
                step: format!("{name}.step"),
            },
            name,
            created: Utc::now(),
            notes: model.notes.clone(),
            spec: model.spec.clone(),
            layout: model.layout.clone(),
            diagnostics: model.diagnostics.clone(),
            triangle_count,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
