use std::path::PathBuf;

use ring_builder::SizeTableError;
use ring_kernel::KernelError;

/// Errors while reading pipeline inputs.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse measurements {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Errors while exporting a model.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid output name '{name}': must be non-empty and contain no path separators")]
    InvalidName { name: String },

    #[error("tessellation tolerance must be positive, got {value}")]
    InvalidTolerance { value: f64 },

    #[error("tessellation failed: {0}")]
    Tessellation(#[source] KernelError),

    #[error("STL export failed: {reason}")]
    Stl { reason: String },

    #[error("STEP export failed: {0}")]
    Step(#[source] KernelError),

    #[error("metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while loading the pipeline configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },

    #[error(transparent)]
    SizeTable(#[from] SizeTableError),
}
