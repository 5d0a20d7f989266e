//! Derived dimensions and placements for a ring, computed before any kernel call.
//!
//! The ring axis is +Z. The band's mid-plane is z = 0 and the stone sits on
//! the axis above it.

use ring_types::{Placement, RingSpec};
use serde::Serialize;

use crate::pattern::radial_pattern;
use crate::size_table::SizeTable;
use crate::types::BuildError;

/// Stone center height above the band top, as a fraction of stone radius.
/// Values below 1.0 sink the stone into the band.
pub const SEATING_DEPTH: f64 = 0.7;
/// Prong axis distance from the ring axis, as a fraction of stone radius.
pub const PRONG_RADIAL_FACTOR: f64 = 0.8;
/// Prong length as a fraction of stone radius.
pub const PRONG_HEIGHT_FACTOR: f64 = 1.2;
/// How far below the stone center a prong starts, as a fraction of stone radius.
pub const PRONG_BASE_DROP: f64 = 0.5;
/// Prong radius in mm. Does not scale with the stone.
pub const PRONG_RADIUS_MM: f64 = 0.5;
pub const PRONG_COUNT: usize = 4;
/// Azimuth of the first prong, in degrees.
pub const PRONG_PHASE_DEG: f64 = 45.0;

/// Every number the builder feeds to the kernel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingLayout {
    pub inner_diameter: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub band_width: f64,
    pub band_thickness: f64,
    pub stone_radius: f64,
    /// Height of the stone center above the band mid-plane.
    pub stone_center_z: f64,
    pub prong_radius: f64,
    pub prong_height: f64,
    /// Height of the prong bottoms.
    pub prong_base_z: f64,
    /// Height of the prong centers (`prong_base_z + prong_height / 2`).
    pub prong_center_z: f64,
    /// One placement per prong; offsets locate the prong centers.
    pub prongs: Vec<Placement>,
}

/// Reject any dimension that is not a positive finite number.
pub fn validate_dimensions(spec: &RingSpec) -> Result<(), BuildError> {
    let fields = [
        ("band_width", spec.band_width),
        ("band_thickness", spec.band_thickness),
        ("stone_diameter", spec.stone_diameter),
    ];
    for (field, value) in fields {
        if !(value.is_finite() && value > 0.0) {
            return Err(BuildError::InvalidDimension { field, value });
        }
    }
    Ok(())
}

impl RingLayout {
    /// Validate `spec` and derive the full layout. Pure.
    pub fn compute(spec: &RingSpec, sizes: &SizeTable) -> Result<Self, BuildError> {
        validate_dimensions(spec)?;
        let inner_diameter = sizes.lookup(&spec.ring_size_code)?;

        let inner_radius = inner_diameter / 2.0;
        let stone_radius = spec.stone_diameter / 2.0;
        let stone_center_z = spec.band_width / 2.0 + stone_radius * SEATING_DEPTH;

        let prong_height = stone_radius * PRONG_HEIGHT_FACTOR;
        let prong_base_z = stone_center_z - stone_radius * PRONG_BASE_DROP;
        let prong_center_z = prong_base_z + prong_height / 2.0;
        let prongs = radial_pattern(
            PRONG_COUNT,
            stone_radius * PRONG_RADIAL_FACTOR,
            PRONG_PHASE_DEG.to_radians(),
            prong_center_z,
        )
        .collect();

        Ok(Self {
            inner_diameter,
            inner_radius,
            outer_radius: inner_radius + spec.band_thickness,
            band_width: spec.band_width,
            band_thickness: spec.band_thickness,
            stone_radius,
            stone_center_z,
            prong_radius: PRONG_RADIUS_MM,
            prong_height,
            prong_base_z,
            prong_center_z,
            prongs,
        })
    }

    /// Band cross-section in the XZ plane: starts at the inner radius, extends
    /// outward by the thickness, centered on the mid-plane.
    pub fn band_profile(&self) -> [[f64; 3]; 4] {
        let (r0, r1) = (self.inner_radius, self.outer_radius);
        let h = self.band_width / 2.0;
        [[r0, 0.0, -h], [r1, 0.0, -h], [r1, 0.0, h], [r0, 0.0, h]]
    }

    /// Top of the band.
    pub fn band_top_z(&self) -> f64 {
        self.band_width / 2.0
    }
}
