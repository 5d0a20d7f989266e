pub mod config;
pub mod errors;
pub mod export;
pub mod load;
pub mod metadata;
pub mod stl;

pub use config::{PipelineConfig, StlFormat};
pub use errors::{ConfigError, ExportError, LoadError};
pub use export::{export_model, ExportOptions, ExportReport};
pub use load::{load_inputs, InputPaths, LoadedInputs, SketchFormat, SketchImage};
pub use metadata::ExportMetadata;
