//! Model export: STL mesh, STEP solid and a JSON metadata sidecar.
//!
//! Everything is rendered in memory first, so a kernel or encoding failure
//! writes nothing. Files are then staged next to their targets and renamed
//! into place.

use std::path::{Path, PathBuf};

use ring_builder::{KernelBundle, RingModel};
use tracing::{debug, info, instrument, warn};

use crate::config::{StlFormat, DEFAULT_TESSELLATION_TOLERANCE};
use crate::errors::ExportError;
use crate::metadata::ExportMetadata;
use crate::stl::{to_ascii_stl, to_binary_stl};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Maximum chordal deviation of the STL mesh, in mm.
    pub tolerance: f64,
    pub stl_format: StlFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TESSELLATION_TOLERANCE,
            stl_format: StlFormat::Binary,
        }
    }
}

/// Paths written by a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub stl_path: PathBuf,
    pub step_path: PathBuf,
    pub metadata_path: PathBuf,
    pub triangle_count: usize,
}

/// A base name is a single non-empty path component.
pub fn validate_base_name(name: &str) -> Result<(), ExportError> {
    let bad = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');
    if bad {
        return Err(ExportError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Write `<base>.stl`, `<base>.step` and `<base>.json` into `output_dir`.
///
/// `kb` must be the kernel that built `model`. The output directory is
/// created if missing; existing files with the same names are replaced.
#[instrument(skip_all, fields(dir = %output_dir.display(), name = base_name))]
pub fn export_model(
    kb: &mut dyn KernelBundle,
    model: &RingModel,
    output_dir: &Path,
    base_name: &str,
    options: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    validate_base_name(base_name)?;
    if !(options.tolerance.is_finite() && options.tolerance > 0.0) {
        return Err(ExportError::InvalidTolerance {
            value: options.tolerance,
        });
    }

    let mesh = kb
        .tessellate(&model.solid, options.tolerance)
        .map_err(ExportError::Tessellation)?;
    let triangle_count = mesh.triangle_count();
    debug!(triangles = triangle_count, "tessellated");

    let stl = match options.stl_format {
        StlFormat::Binary => to_binary_stl(&mesh, base_name)?,
        StlFormat::Ascii => to_ascii_stl(&mesh, base_name)?.into_bytes(),
    };

    let step_name = format!("{base_name}.step");
    let step = kb
        .export_step(&model.solid, &step_name)
        .map_err(ExportError::Step)?;

    let metadata = ExportMetadata::new(base_name, model, triangle_count).to_json()?;

    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let report = ExportReport {
        stl_path: output_dir.join(format!("{base_name}.stl")),
        step_path: output_dir.join(step_name),
        metadata_path: output_dir.join(format!("{base_name}.json")),
        triangle_count,
    };

    write_all_or_nothing(&[
        (report.stl_path.as_path(), stl.as_slice()),
        (report.step_path.as_path(), step.as_bytes()),
        (report.metadata_path.as_path(), metadata.as_bytes()),
    ])?;

    info!(
        stl = %report.stl_path.display(),
        step = %report.step_path.display(),
        triangles = triangle_count,
        "model exported"
    );
    Ok(report)
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    if let Some(file_name) = target.file_name() {
        name.push(file_name);
    }
    name.push(".partial");
    target.with_file_name(name)
}

/// Stage every file, then rename each into place. Staged files are removed
/// if any write fails.
fn write_all_or_nothing(files: &[(&Path, &[u8])]) -> Result<(), ExportError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());

    for &(target, bytes) in files {
        let tmp = staging_path(target);
        if let Err(source) = std::fs::write(&tmp, bytes) {
            let _ = std::fs::remove_file(&tmp);
            discard(&staged);
            return Err(ExportError::Io {
                path: target.to_path_buf(),
                source,
            });
        }
        staged.push((tmp, target));
    }

    for (i, (tmp, target)) in staged.iter().enumerate() {
        if let Err(source) = std::fs::rename(tmp, target) {
            discard(&staged[i..]);
            return Err(ExportError::Io {
                path: target.to_path_buf(),
                source,
            });
        }
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(e) = std::fs::remove_file(tmp) {
            warn!(path = %tmp.display(), error = %e, "failed to remove staged file");
        }
    }
}
