mod args;
mod pipeline;

use anyhow::Context;
use clap::Parser;
use ring_io::PipelineConfig;
use ring_kernel::TruckKernel;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let config = args.apply(config);

    let mut kernel = TruckKernel::new();
    let report = pipeline::run(&config, &mut kernel)?;

    println!("STL:      {}", report.stl_path.display());
    println!("STEP:     {}", report.step_path.display());
    println!("Metadata: {}", report.metadata_path.display());
    Ok(())
}
