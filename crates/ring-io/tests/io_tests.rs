use std::fs;
use std::path::Path;

use ring_builder::{RingModel, RingModelBuilder};
use ring_io::{
    export_model, load_inputs, ExportError, ExportOptions, InputPaths, LoadError, SketchFormat,
    StlFormat,
};
use ring_kernel::{KernelCall, MockKernel, MockOp};
use ring_types::RingSpec;

// ── Helpers ────────────────────────────────────────────────────────────────

fn write_inputs(dir: &Path, measurements: &str, description: Option<&str>) {
    fs::write(dir.join("measurements.json"), measurements).unwrap();
    if let Some(text) = description {
        fs::write(dir.join("description.txt"), text).unwrap();
    }
}

const SCENARIO_A: &str = r#"{
    "ring_size_us": "8",
    "band_width_mm": 2.0,
    "band_thickness_mm": 1.5,
    "stone_diameter_mm": 4.0
}"#;

fn built_model(kernel: &mut MockKernel) -> RingModel {
    RingModelBuilder::default()
        .build(kernel, &RingSpec::new("8", 2.0, 1.5, 4.0), "solitaire, yellow gold")
        .unwrap()
}

// ── Loading ────────────────────────────────────────────────────────────────

#[test]
fn loads_measurements_and_description_without_sketch() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), SCENARIO_A, Some("A simple solitaire.\n"));

    let inputs = load_inputs(&InputPaths::in_dir(dir.path())).unwrap();

    assert_eq!(inputs.measurements.to_spec(), RingSpec::new("8", 2.0, 1.5, 4.0));
    assert_eq!(inputs.description, "A simple solitaire.\n");
    assert!(inputs.sketch.is_none());
}

#[test]
fn numeric_size_code_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(
        dir.path(),
        r#"{"ring_size_us": 7, "band_width_mm": 2, "band_thickness_mm": 1.5, "stone_diameter_mm": 4}"#,
        Some(""),
    );

    let inputs = load_inputs(&InputPaths::in_dir(dir.path())).unwrap();
    assert_eq!(inputs.measurements.ring_size_us, "7");
    assert_eq!(inputs.measurements.band_width_mm, 2.0);
}

#[test]
fn sketch_is_read_and_sniffed() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), SCENARIO_A, Some("desc"));
    fs::write(dir.path().join("sketch.png"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();

    let inputs = load_inputs(&InputPaths::in_dir(dir.path())).unwrap();
    let sketch = inputs.sketch.unwrap();
    assert_eq!(sketch.format, SketchFormat::Png);
    assert_eq!(sketch.bytes.len(), 16);
}

#[test]
fn missing_measurements_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("description.txt"), "desc").unwrap();

    let err = load_inputs(&InputPaths::in_dir(dir.path())).unwrap_err();
    match err {
        LoadError::NotFound { path } => assert!(path.ends_with("measurements.json")),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn missing_description_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), SCENARIO_A, None);

    let err = load_inputs(&InputPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { ref path } if path.ends_with("description.txt")));
}

#[test]
fn malformed_measurements_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), r#"{"ring_size_us": "8", "band_width_mm": 2.0}"#, Some(""));

    let err = load_inputs(&InputPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("measurements.json"));
}

// ── Export ─────────────────────────────────────────────────────────────────

#[test]
fn export_writes_three_files() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("nested").join("outputs");

    let report = export_model(
        &mut kernel,
        &model,
        &target,
        "generated_ring",
        &ExportOptions::default(),
    )
    .unwrap();

    assert_eq!(report.stl_path, target.join("generated_ring.stl"));
    assert_eq!(report.step_path, target.join("generated_ring.step"));
    assert_eq!(report.metadata_path, target.join("generated_ring.json"));
    assert!(report.triangle_count > 0);

    let stl = fs::read(&report.stl_path).unwrap();
    assert_eq!(stl.len(), 84 + 50 * report.triangle_count);

    let step = fs::read_to_string(&report.step_path).unwrap();
    assert!(step.starts_with("ISO-10303-21;"));

    // No staging leftovers.
    let names: Vec<_> = fs::read_dir(&target)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names.len(), 3, "{names:?}");
}

#[test]
fn export_tessellates_then_writes_step_with_file_name() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    let out = tempfile::tempdir().unwrap();
    let before = kernel.call_count();

    export_model(
        &mut kernel,
        &model,
        out.path(),
        "ring",
        &ExportOptions {
            tolerance: 0.02,
            stl_format: StlFormat::Binary,
        },
    )
    .unwrap();

    assert_eq!(
        &kernel.calls()[before..],
        &[
            KernelCall::Tessellate { tolerance: 0.02 },
            KernelCall::ExportStep {
                file_name: "ring.step".to_string()
            },
        ]
    );
}

#[test]
fn ascii_stl_option() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    let out = tempfile::tempdir().unwrap();

    let report = export_model(
        &mut kernel,
        &model,
        out.path(),
        "ring",
        &ExportOptions {
            stl_format: StlFormat::Ascii,
            ..ExportOptions::default()
        },
    )
    .unwrap();

    let stl = fs::read_to_string(&report.stl_path).unwrap();
    assert!(stl.starts_with("solid ring"));
    assert_eq!(stl.matches("endfacet").count(), report.triangle_count);
}

#[test]
fn metadata_sidecar_carries_notes_and_layout() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    let out = tempfile::tempdir().unwrap();

    let report = export_model(
        &mut kernel,
        &model,
        out.path(),
        "ring",
        &ExportOptions::default(),
    )
    .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report.metadata_path).unwrap()).unwrap();
    assert_eq!(json["format"], "ring-export");
    assert_eq!(json["name"], "ring");
    assert_eq!(json["notes"], "solitaire, yellow gold");
    assert_eq!(json["spec"]["ring_size_code"], "8");
    assert_eq!(json["files"]["stl"], "ring.stl");
    assert_eq!(json["triangle_count"], report.triangle_count);
    assert_eq!(json["layout"]["prongs"].as_array().unwrap().len(), 4);
    assert!((json["layout"]["inner_radius"].as_f64().unwrap() - 9.095).abs() < 1e-9);
    assert!(json["id"].as_str().unwrap().len() == 36);
}

#[test]
fn invalid_name_writes_nothing() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    let out = tempfile::tempdir().unwrap();
    let before = kernel.call_count();

    let err = export_model(
        &mut kernel,
        &model,
        out.path(),
        "../escape",
        &ExportOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ExportError::InvalidName { .. }));
    assert_eq!(kernel.call_count(), before);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn non_positive_tolerance_rejected() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    let out = tempfile::tempdir().unwrap();

    let err = export_model(
        &mut kernel,
        &model,
        out.path(),
        "ring",
        &ExportOptions {
            tolerance: 0.0,
            ..ExportOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::InvalidTolerance { .. }));
}

#[test]
fn step_failure_writes_nothing() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    kernel.fail_on(MockOp::StepExport);
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("outputs");

    let err = export_model(
        &mut kernel,
        &model,
        &target,
        "ring",
        &ExportOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ExportError::Step(_)));
    assert!(!target.exists());
}

#[test]
fn tessellation_failure_is_reported() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    kernel.fail_on(MockOp::Tessellate);
    let out = tempfile::tempdir().unwrap();

    let err = export_model(
        &mut kernel,
        &model,
        out.path(),
        "ring",
        &ExportOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::Tessellation(_)));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn export_replaces_previous_files() {
    let mut kernel = MockKernel::new();
    let model = built_model(&mut kernel);
    let out = tempfile::tempdir().unwrap();
    fs::write(out.path().join("ring.stl"), b"stale").unwrap();

    let report = export_model(
        &mut kernel,
        &model,
        out.path(),
        "ring",
        &ExportOptions::default(),
    )
    .unwrap();

    assert_ne!(fs::read(&report.stl_path).unwrap(), b"stale");
}
