//! Input loading: measurements, description and the optional sketch.

use std::path::{Path, PathBuf};

use ring_types::Measurements;
use tracing::{info, instrument, warn};

use crate::errors::LoadError;

/// File names looked up inside an input directory.
pub const MEASUREMENTS_FILE: &str = "measurements.json";
pub const DESCRIPTION_FILE: &str = "description.txt";
pub const SKETCH_FILE: &str = "sketch.png";

/// Locations of the three pipeline inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub measurements: PathBuf,
    pub description: PathBuf,
    pub sketch: PathBuf,
}

impl InputPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            measurements: dir.join(MEASUREMENTS_FILE),
            description: dir.join(DESCRIPTION_FILE),
            sketch: dir.join(SKETCH_FILE),
        }
    }
}

/// Image container detected from the first bytes of the sketch file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchFormat {
    Png,
    Jpeg,
    Unknown,
}

impl SketchFormat {
    pub fn sniff(bytes: &[u8]) -> Self {
        const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
        const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
        if bytes.starts_with(PNG_MAGIC) {
            SketchFormat::Png
        } else if bytes.starts_with(JPEG_MAGIC) {
            SketchFormat::Jpeg
        } else {
            SketchFormat::Unknown
        }
    }
}

/// Raw sketch image. Carried along for callers; the builder never reads it.
#[derive(Debug, Clone)]
pub struct SketchImage {
    pub path: PathBuf,
    pub format: SketchFormat,
    pub bytes: Vec<u8>,
}

/// Everything the pipeline reads before building.
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub measurements: Measurements,
    pub description: String,
    pub sketch: Option<SketchImage>,
}

/// Read measurements (required), description (required) and sketch (optional).
#[instrument(skip_all, fields(measurements = %paths.measurements.display()))]
pub fn load_inputs(paths: &InputPaths) -> Result<LoadedInputs, LoadError> {
    let measurements = load_measurements(&paths.measurements)?;

    let description = std::fs::read_to_string(&paths.description)
        .map_err(|e| LoadError::from_io(&paths.description, e))?;

    let sketch = load_sketch(&paths.sketch)?;

    info!(
        size = %measurements.ring_size_us,
        description_len = description.len(),
        sketch = sketch.is_some(),
        "inputs loaded"
    );
    Ok(LoadedInputs {
        measurements,
        description,
        sketch,
    })
}

pub fn load_measurements(path: &Path) -> Result<Measurements, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A missing sketch is not an error; any other read failure is.
fn load_sketch(path: &Path) -> Result<Option<SketchImage>, LoadError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let format = SketchFormat::sniff(&bytes);
            if format == SketchFormat::Unknown {
                warn!(path = %path.display(), "sketch is not a PNG or JPEG image");
            }
            Ok(Some(SketchImage {
                path: path.to_path_buf(),
                format,
                bytes,
            }))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "no sketch image found");
            Ok(None)
        }
        Err(e) => Err(LoadError::from_io(path, e)),
    }
}
