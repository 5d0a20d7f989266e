pub mod band;
pub mod builder;
pub mod kernel_ext;
pub mod layout;
pub mod pattern;
pub mod prongs;
pub mod size_table;
pub mod stone;
pub mod types;

pub use builder::RingModelBuilder;
pub use kernel_ext::KernelBundle;
pub use layout::RingLayout;
pub use pattern::{radial_pattern, RadialPattern};
pub use size_table::{SizeTable, SizeTableError, STANDARD_SIZES};
pub use types::*;
