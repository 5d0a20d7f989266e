//! Pipeline configuration read from a TOML file.
//!
//! Every field is optional; missing fields fall back to the defaults below.
//!
//! ```toml
//! input_dir = "inputs"
//! output_dir = "outputs"
//! base_name = "generated_ring"
//! tessellation_tolerance = 0.05
//! stl_format = "binary"
//! size_table = "sizes.json"
//! ```

use std::path::{Path, PathBuf};

use ring_builder::SizeTable;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::export::{validate_base_name, ExportOptions};
use crate::load::InputPaths;

pub const DEFAULT_INPUT_DIR: &str = "inputs";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_BASE_NAME: &str = "generated_ring";
pub const DEFAULT_TESSELLATION_TOLERANCE: f64 = 0.05;

/// STL encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Shared stem of the exported files.
    pub base_name: String,
    /// Maximum chordal deviation of the STL mesh, in mm.
    pub tessellation_tolerance: f64,
    pub stl_format: StlFormat,
    /// Extra size-code entries layered over the standard table.
    pub size_table: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            base_name: DEFAULT_BASE_NAME.to_string(),
            tessellation_tolerance: DEFAULT_TESSELLATION_TOLERANCE,
            stl_format: StlFormat::Binary,
            size_table: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tessellation_tolerance.is_finite() && self.tessellation_tolerance > 0.0) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "tessellation_tolerance must be positive, got {}",
                    self.tessellation_tolerance
                ),
            });
        }
        validate_base_name(&self.base_name).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })
    }

    pub fn input_paths(&self) -> InputPaths {
        InputPaths::in_dir(&self.input_dir)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            tolerance: self.tessellation_tolerance,
            stl_format: self.stl_format,
        }
    }

    /// Standard sizes, extended with the configured table if any.
    pub fn load_size_table(&self) -> Result<SizeTable, ConfigError> {
        let mut table = SizeTable::standard();
        if let Some(path) = &self.size_table {
            table.extend(SizeTable::load(path)?);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.stl_format, StlFormat::Binary);
        assert_eq!(config.base_name, "generated_ring");
    }

    #[test]
    fn partial_override() {
        let config = PipelineConfig::from_toml_str(
            r#"
            output_dir = "build/rings"
            stl_format = "ascii"
            tessellation_tolerance = 0.01
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("build/rings"));
        assert_eq!(config.input_dir, PathBuf::from("inputs"));
        assert_eq!(config.stl_format, StlFormat::Ascii);
        assert_eq!(config.export_options().tolerance, 0.01);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = PipelineConfig::from_toml_str("colour = \"gold\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_values_rejected() {
        assert!(matches!(
            PipelineConfig::from_toml_str("tessellation_tolerance = 0.0"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            PipelineConfig::from_toml_str("base_name = \"a/b\""),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            PipelineConfig::from_toml_str("stl_format = \"obj\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn standard_table_without_extension() {
        let table = PipelineConfig::default().load_size_table().unwrap();
        assert_eq!(table, SizeTable::standard());
    }
}
