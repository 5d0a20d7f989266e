use serde::{Deserialize, Deserializer, Serialize};

/// Measurements record as it arrives from the input loader.
///
/// Field names match the on-disk `measurements.json` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// US ring size. Accepts either a JSON string (`"8"`) or number (`8`).
    #[serde(deserialize_with = "size_code_from_json")]
    pub ring_size_us: String,
    pub band_width_mm: f64,
    pub band_thickness_mm: f64,
    pub stone_diameter_mm: f64,
}

impl Measurements {
    /// Map the wire record onto the builder's input. No validation happens here.
    pub fn to_spec(&self) -> RingSpec {
        RingSpec {
            ring_size_code: self.ring_size_us.clone(),
            band_width: self.band_width_mm,
            band_thickness: self.band_thickness_mm,
            stone_diameter: self.stone_diameter_mm,
        }
    }
}

/// Immutable input to the ring builder. All lengths are in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    /// Key into the size table (e.g. `"8"`).
    pub ring_size_code: String,
    /// Axial (vertical) extent of the band.
    pub band_width: f64,
    /// Radial extent of the band.
    pub band_thickness: f64,
    pub stone_diameter: f64,
}

impl RingSpec {
    pub fn new(
        ring_size_code: impl Into<String>,
        band_width: f64,
        band_thickness: f64,
        stone_diameter: f64,
    ) -> Self {
        Self {
            ring_size_code: ring_size_code.into(),
            band_width,
            band_thickness,
            stone_diameter,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSizeCode {
    Text(String),
    Number(serde_json::Number),
}

fn size_code_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawSizeCode::deserialize(deserializer)? {
        RawSizeCode::Text(s) => s,
        RawSizeCode::Number(n) => n.to_string(),
    })
}
