//! Ring size → inner diameter mapping.
//!
//! The built-in table is plain data; extra sizes come from a JSON object
//! `{ "<code>": <inner diameter mm>, ... }` so new sizes never touch code.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::BuildError;

/// US ring sizes and their inner diameters in millimeters.
pub const STANDARD_SIZES: &[(&str, f64)] = &[
    ("6", 16.51),
    ("7", 17.35),
    ("8", 18.19),
    ("9", 18.89),
];

/// Errors reading an external size table.
#[derive(Debug, thiserror::Error)]
pub enum SizeTableError {
    #[error("failed to read size table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse size table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("size '{code}' has invalid inner diameter {value} (must be positive)")]
    InvalidDiameter { code: String, value: f64 },
}

/// Immutable lookup from size code to inner diameter (mm).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SizeTable {
    entries: BTreeMap<String, f64>,
}

impl SizeTable {
    /// The built-in US sizes.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_SIZES
                .iter()
                .map(|&(code, d)| (code.to_string(), d))
                .collect(),
        }
    }

    /// Build from arbitrary entries, rejecting non-positive diameters.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, SizeTableError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (code, diameter) in entries {
            let code = code.into();
            if !(diameter.is_finite() && diameter > 0.0) {
                return Err(SizeTableError::InvalidDiameter {
                    code,
                    value: diameter,
                });
            }
            table.insert(code, diameter);
        }
        Ok(Self { entries: table })
    }

    pub fn from_json_str(json: &str) -> Result<Self, SizeTableError> {
        let raw: BTreeMap<String, f64> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SizeTableError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SizeTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Add or replace entries from `other`.
    pub fn extend(&mut self, other: SizeTable) {
        self.entries.extend(other.entries);
    }

    /// Inner diameter for `code`, or `UnsupportedSize` listing every valid code.
    pub fn lookup(&self, code: &str) -> Result<f64, BuildError> {
        self.entries
            .get(code)
            .copied()
            .ok_or_else(|| BuildError::UnsupportedSize {
                code: code.to_string(),
                valid: self.codes(),
            })
    }

    /// Valid codes, numeric codes in numeric order first.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.entries.keys().cloned().collect();
        codes.sort_by(|a, b| {
            let ka = a.parse::<f64>().unwrap_or(f64::INFINITY);
            let kb = b.parse::<f64>().unwrap_or(f64::INFINITY);
            ka.total_cmp(&kb).then_with(|| a.cmp(b))
        });
        codes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SizeTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn standard_sizes_resolve() {
        let table = SizeTable::standard();
        for &(code, d) in STANDARD_SIZES {
            assert_eq!(table.lookup(code).unwrap(), d);
        }
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn unknown_size_lists_valid_codes() {
        let err = SizeTable::standard().lookup("99").unwrap_err();
        match &err {
            BuildError::UnsupportedSize { code, valid } => {
                assert_eq!(code, "99");
                assert_eq!(valid, &["6", "7", "8", "9"]);
            }
            other => panic!("expected UnsupportedSize, got {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("'99'"));
        assert!(msg.contains("6, 7, 8, 9"));
    }

    #[test]
    fn numeric_codes_sort_numerically() {
        let mut table = SizeTable::standard();
        table.extend(SizeTable::from_entries([("10", 19.84), ("6.5", 16.92)]).unwrap());
        assert_eq!(table.codes(), ["6", "6.5", "7", "8", "9", "10"]);
    }

    #[test]
    fn json_table_overrides_and_extends() {
        let mut table = SizeTable::standard();
        table.extend(SizeTable::from_json_str(r#"{"10": 19.84, "8": 18.2}"#).unwrap());
        assert_eq!(table.lookup("10").unwrap(), 19.84);
        assert_eq!(table.lookup("8").unwrap(), 18.2);
        assert_eq!(table.lookup("6").unwrap(), 16.51);
    }

    #[test]
    fn json_table_rejects_bad_diameter() {
        let err = SizeTable::from_json_str(r#"{"5": 0}"#).unwrap_err();
        assert!(matches!(err, SizeTableError::InvalidDiameter { .. }));
        assert!(SizeTable::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"11": 20.68}}"#).unwrap();
        let table = SizeTable::load(file.path()).unwrap();
        assert_eq!(table.lookup("11").unwrap(), 20.68);

        let missing = SizeTable::load(file.path().with_extension("nope"));
        assert!(matches!(missing, Err(SizeTableError::Io { .. })));
    }
}
