use anyhow::Context;
use ring_builder::{KernelBundle, RingModelBuilder};
use ring_io::{export_model, load_inputs, ExportReport, PipelineConfig};
use tracing::info;

/// Load inputs, build the ring in `kernel` and export it.
///
/// Nothing is written unless the build succeeds.
pub fn run(config: &PipelineConfig, kernel: &mut dyn KernelBundle) -> anyhow::Result<ExportReport> {
    config.validate().context("invalid configuration")?;

    let sizes = config
        .load_size_table()
        .context("failed to load size table")?;
    let inputs = load_inputs(&config.input_paths()).context("failed to load inputs")?;
    let spec = inputs.measurements.to_spec();
    info!(
        size = %spec.ring_size_code,
        band_width = spec.band_width,
        band_thickness = spec.band_thickness,
        stone_diameter = spec.stone_diameter,
        "building ring"
    );

    let model = RingModelBuilder::new(sizes)
        .build(kernel, &spec, inputs.description)
        .context("ring build failed")?;

    export_model(
        kernel,
        &model,
        &config.output_dir,
        &config.base_name,
        &config.export_options(),
    )
    .context("export failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring_kernel::{KernelCall, MockKernel};
    use std::fs;

    fn config_in(root: &std::path::Path) -> PipelineConfig {
        PipelineConfig {
            input_dir: root.join("inputs"),
            output_dir: root.join("outputs"),
            ..PipelineConfig::default()
        }
    }

    fn write_inputs(root: &std::path::Path, size: &str) {
        let inputs = root.join("inputs");
        fs::create_dir_all(&inputs).unwrap();
        fs::write(
            inputs.join("measurements.json"),
            format!(
                r#"{{"ring_size_us": "{size}", "band_width_mm": 2.0, "band_thickness_mm": 1.5, "stone_diameter_mm": 4.0}}"#
            ),
        )
        .unwrap();
        fs::write(inputs.join("description.txt"), "test ring").unwrap();
    }

    #[test]
    fn end_to_end_with_mock_kernel() {
        let root = tempfile::tempdir().unwrap();
        write_inputs(root.path(), "8");
        let config = config_in(root.path());
        let mut kernel = MockKernel::new();

        let report = run(&config, &mut kernel).unwrap();

        assert!(report.stl_path.ends_with("outputs/generated_ring.stl"));
        assert!(report.step_path.exists());
        assert!(report.metadata_path.exists());
    }

    #[test]
    fn failed_build_exports_nothing() {
        let root = tempfile::tempdir().unwrap();
        write_inputs(root.path(), "12");
        let config = config_in(root.path());
        let mut kernel = MockKernel::new();

        let err = run(&config, &mut kernel).unwrap_err();

        assert!(format!("{err:#}").contains("ring size '12' not supported"));
        assert!(!kernel
            .calls()
            .iter()
            .any(|c| matches!(c, KernelCall::Tessellate { .. } | KernelCall::ExportStep { .. })));
        assert!(!root.path().join("outputs").exists());
    }

    #[test]
    fn missing_inputs_fail_before_kernel() {
        let root = tempfile::tempdir().unwrap();
        let config = config_in(root.path());
        let mut kernel = MockKernel::new();

        let err = run(&config, &mut kernel).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load inputs"));
        assert_eq!(kernel.call_count(), 0);
    }
}
