use serde::{Deserialize, Serialize};

/// A single rigid placement of a repeated feature around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Azimuth in radians, measured from +X toward +Y.
    pub angle: f64,
    /// Translation applied to a feature built at the origin.
    pub offset: [f64; 3],
}

impl Placement {
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}
