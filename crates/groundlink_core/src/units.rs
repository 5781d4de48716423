//! Unit conversion and display formatting.
//!
//! # Invariants
//! - Converted distances (`nm`, `miles`) keep one decimal place.
//! - Meter, feet and knot outputs are truncated toward zero, never rounded.

use crate::settings::{DistUnit, HeightUnit, SpeedUnit, Settings};

pub const METERS_TO_NAUTICAL_MILES: f64 = 0.000539957;
pub const METERS_TO_MILES: f64 = 0.000621371;
pub const METERS_TO_FEET: f64 = 3.28084;
pub const MPS_TO_KNOTS: f64 = 1.94384;

/// Formats a distance in the given unit.
pub fn format_distance(unit: DistUnit, meters: f64) -> String {
    match unit {
        DistUnit::Nm => format!("{:.1}nm", meters * METERS_TO_NAUTICAL_MILES),
        DistUnit::Miles => format!("{:.1}miles", meters * METERS_TO_MILES),
        DistUnit::Meters => format!("{}m", truncate(meters)),
    }
}

/// Formats a height in the given unit.
pub fn format_height(unit: HeightUnit, meters: f64) -> String {
    match unit {
        HeightUnit::Feet => format!("{}ft", truncate(meters * METERS_TO_FEET)),
        HeightUnit::Meters => format!("{}m", truncate(meters)),
    }
}

/// Formats a speed in the given unit.
pub fn format_speed(unit: SpeedUnit, meters_per_second: f64) -> String {
    match unit {
        SpeedUnit::Knots => format!("{}kn", truncate(meters_per_second * MPS_TO_KNOTS)),
        SpeedUnit::MetersPerSecond => format!("{}m/s", truncate(meters_per_second)),
    }
}

/// Distance string using the unit selected in `settings`.
pub fn dist_string(settings: &Settings, meters: f64) -> String {
    format_distance(settings.dist_unit, meters)
}

/// Height string using the unit selected in `settings`.
pub fn height_string(settings: &Settings, meters: f64) -> String {
    format_height(settings.height_unit, meters)
}

/// Speed string using the unit selected in `settings`.
pub fn speed_string(settings: &Settings, meters_per_second: f64) -> String {
    format_speed(settings.speed_unit, meters_per_second)
}

// NaN maps to 0 and infinities saturate.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}
