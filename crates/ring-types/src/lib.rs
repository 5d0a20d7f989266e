pub mod bbox;
pub mod placement;
pub mod spec;

pub use bbox::*;
pub use placement::*;
pub use spec::*;
