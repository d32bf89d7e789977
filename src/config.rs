use std::io::Read;

use crate::foundation::core::{FrameRate, StreamKind};
use crate::foundation::error::{OverlayError, OverlayResult};

/// Display unit for the speed stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SpeedUnit {
    /// Kilometers per hour.
    #[default]
    #[serde(rename = "kmh")]
    KmH = 0,
    /// Pace in (decimal) minutes per kilometer.
    #[serde(rename = "min-km")]
    MinKm = 1,
    /// Meters per second, the document's native unit.
    #[serde(rename = "ms")]
    Ms = 2,
    /// Miles per hour.
    #[serde(rename = "mph")]
    Mph = 3,
}

/// Conversion record applied to a native m/s value: `value.powi(power) * multiplier`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitParams {
    /// Exponent applied before scaling (`-1` turns a speed into a pace).
    pub power: i32,
    /// Scale factor applied after the exponent.
    pub multiplier: f64,
}

// Indexed by `SpeedUnit` discriminant.
const UNIT_PARAMS: [UnitParams; 4] = [
    UnitParams {
        power: 1,
        multiplier: 3.6,
    },
    UnitParams {
        power: -1,
        multiplier: 16.667,
    },
    UnitParams {
        power: 1,
        multiplier: 1.0,
    },
    UnitParams {
        power: 1,
        multiplier: 2.236_936_29,
    },
];

impl SpeedUnit {
    /// All units in menu order.
    pub const ALL: [SpeedUnit; 4] = [
        SpeedUnit::KmH,
        SpeedUnit::MinKm,
        SpeedUnit::Ms,
        SpeedUnit::Mph,
    ];

    /// Conversion parameters for this unit.
    pub fn params(self) -> UnitParams {
        UNIT_PARAMS[self as usize]
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SpeedUnit::KmH => "km/h",
            SpeedUnit::MinKm => "min/km",
            SpeedUnit::Ms => "m/s",
            SpeedUnit::Mph => "mph",
        }
    }

    /// Digit used to select this unit in the interactive menu.
    pub fn menu_digit(self) -> char {
        match self {
            SpeedUnit::KmH => '0',
            SpeedUnit::MinKm => '1',
            SpeedUnit::Ms => '2',
            SpeedUnit::Mph => '3',
        }
    }

    /// Format a native m/s speed for display, rounded to one decimal.
    ///
    /// Zero bypasses the conversion so a negative power never divides by zero.
    pub fn format_speed(self, value: f64) -> String {
        if value == 0.0 {
            return "0.0".to_string();
        }
        let p = self.params();
        format!("{:.1}", value.powi(p.power) * p.multiplier)
    }
}

impl std::fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Settings that drive one overlay run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Unit used to display speed.
    pub speed_unit: SpeedUnit,
    /// Speed stream frame rate.
    pub speed_rate: FrameRate,
    /// Heart-rate stream frame rate.
    pub heart_rate_rate: FrameRate,
    /// Font size in pixels.
    pub font_size: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            speed_unit: SpeedUnit::KmH,
            speed_rate: FrameRate(2),
            heart_rate_rate: FrameRate(1),
            font_size: 100,
        }
    }
}

impl OverlayConfig {
    /// Reject values that cannot drive a run.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.font_size == 0 {
            return Err(OverlayError::invalid_config("font size must be > 0"));
        }
        Ok(())
    }

    /// Read a JSON config; absent fields keep their defaults.
    pub fn from_reader(reader: impl Read) -> OverlayResult<Self> {
        let cfg: OverlayConfig = serde_json::from_reader(reader)
            .map_err(|e| OverlayError::invalid_config(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Frame rate configured for `kind`.
    pub fn rate_for(&self, kind: StreamKind) -> FrameRate {
        match kind {
            StreamKind::Speed => self.speed_rate,
            StreamKind::HeartRate => self.heart_rate_rate,
        }
    }
}

/// Parse a speed unit selection. Empty input selects `default`.
///
/// Accepts the menu digits `0`-`3` as well as unit names such as `kmh`, `min/km` or `mph`.
pub fn parse_speed_unit(input: &str, default: SpeedUnit) -> OverlayResult<SpeedUnit> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(default);
    }
    let unit = match s.to_ascii_lowercase().as_str() {
        "0" | "kmh" | "km/h" => SpeedUnit::KmH,
        "1" | "minkm" | "min-km" | "min/km" => SpeedUnit::MinKm,
        "2" | "ms" | "m/s" => SpeedUnit::Ms,
        "3" | "mph" => SpeedUnit::Mph,
        _ => {
            return Err(OverlayError::invalid_config(format!(
                "unknown speed unit '{s}'"
            )));
        }
    };
    Ok(unit)
}

/// Parse a frame rate. Empty input selects `default`; 0 is valid and disables the stream.
pub fn parse_frame_rate(input: &str, default: FrameRate) -> OverlayResult<FrameRate> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(default);
    }
    s.parse::<u32>().map(FrameRate).map_err(|_| {
        OverlayError::invalid_config(format!(
            "frame rate must be a non-negative integer, got '{s}'"
        ))
    })
}

/// Parse a font size in pixels. Empty input selects `default`.
pub fn parse_font_size(input: &str, default: u32) -> OverlayResult<u32> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(default);
    }
    match s.parse::<u32>() {
        Ok(0) | Err(_) => Err(OverlayError::invalid_config(format!(
            "font size must be a positive integer, got '{s}'"
        ))),
        Ok(size) => Ok(size),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
