use std::path::PathBuf;

use clap::Parser;
use ring_io::{PipelineConfig, StlFormat};

/// Generate a solitaire ring as STL and STEP from a measurements file.
#[derive(Parser, Debug)]
#[command(name = "ringgen", author, version, about)]
pub struct Args {
    /// TOML pipeline configuration. Flags below override its values.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory holding measurements.json, description.txt and sketch.png.
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Base name of the exported files.
    #[arg(long)]
    pub name: Option<String>,

    /// JSON object of extra ring sizes: {"<code>": <inner diameter mm>}.
    #[arg(long)]
    pub sizes: Option<PathBuf>,

    /// STL chordal tolerance in mm.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Write ASCII STL instead of binary.
    #[arg(long)]
    pub ascii_stl: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Layer the command-line overrides onto `config`.
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(name) = &self.name {
            config.base_name = name.clone();
        }
        if let Some(sizes) = &self.sizes {
            config.size_table = Some(sizes.clone());
        }
        if let Some(tolerance) = self.tolerance {
            config.tessellation_tolerance = tolerance;
        }
        if self.ascii_stl {
            config.stl_format = StlFormat::Ascii;
        }
        config
    }

    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
