//! Typed settings record shared by every module.
//!
//! # Responsibility
//! - Hold user-selected units and target vehicle ids.
//! - Load settings from JSON and apply `set <name> <value>` style edits.
//!
//! # Invariants
//! - Missing JSON keys take defaults; unknown keys are rejected.
//! - Unit values use the same short strings in JSON and in `set` input.

use crate::host::DEFAULT_PARAM_RETRIES;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Distance display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "nm")]
    Nm,
    #[serde(rename = "miles")]
    Miles,
}

impl DistUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Nm => "nm",
            Self::Miles => "miles",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "m" => Some(Self::Meters),
            "nm" => Some(Self::Nm),
            "miles" => Some(Self::Miles),
            _ => None,
        }
    }
}

/// Height display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "feet")]
    Feet,
}

impl HeightUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Feet => "feet",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "m" => Some(Self::Meters),
            "feet" => Some(Self::Feet),
            _ => None,
        }
    }
}

/// Speed display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[default]
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[serde(rename = "knots")]
    Knots,
}

impl SpeedUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MetersPerSecond => "m/s",
            Self::Knots => "knots",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "m/s" => Some(Self::MetersPerSecond),
            "knots" => Some(Self::Knots),
            _ => None,
        }
    }
}

/// Setting names accepted by [`Settings::set`], in display order.
const SETTING_NAMES: &[&str] = &[
    "dist_unit",
    "height_unit",
    "speed_unit",
    "target_system",
    "target_component",
    "link",
    "param_retries",
];

/// Application-wide settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub dist_unit: DistUnit,
    pub height_unit: HeightUnit,
    pub speed_unit: SpeedUnit,
    /// MAVLink system id commands are addressed to. `0` broadcasts.
    pub target_system: u8,
    /// MAVLink component id commands are addressed to. `0` broadcasts.
    pub target_component: u8,
    /// 1-based index of the primary link.
    pub link: u32,
    /// Attempt budget handed to the host for each parameter write.
    pub param_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dist_unit: DistUnit::default(),
            height_unit: HeightUnit::default(),
            speed_unit: SpeedUnit::default(),
            target_system: 0,
            target_component: 0,
            link: 1,
            param_retries: DEFAULT_PARAM_RETRIES,
        }
    }
}

impl Settings {
    /// Parses settings from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(raw).map_err(SettingsError::Parse)
    }

    /// Reads and parses a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_json_str(&raw)
    }

    /// Returns the names accepted by [`Settings::set`].
    pub fn names() -> &'static [&'static str] {
        SETTING_NAMES
    }

    /// Applies one user edit given in string form, e.g. `("dist_unit", "nm")`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
        let value = value.trim();
        let invalid = || SettingsError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        match name.trim() {
            "dist_unit" => self.dist_unit = DistUnit::parse(value).ok_or_else(invalid)?,
            "height_unit" => self.height_unit = HeightUnit::parse(value).ok_or_else(invalid)?,
            "speed_unit" => self.speed_unit = SpeedUnit::parse(value).ok_or_else(invalid)?,
            "target_system" => self.target_system = value.parse().map_err(|_| invalid())?,
            "target_component" => self.target_component = value.parse().map_err(|_| invalid())?,
            "link" => {
                let link: u32 = value.parse().map_err(|_| invalid())?;
                if link == 0 {
                    return Err(invalid());
                }
                self.link = link;
            }
            "param_retries" => self.param_retries = value.parse().map_err(|_| invalid())?,
            other => return Err(SettingsError::UnknownSetting(other.to_string())),
        }
        Ok(())
    }
}

/// Settings load and edit errors.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnknownSetting(String),
    InvalidValue { name: String, value: String },
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::UnknownSetting(name) => write!(f, "unknown setting: {name}"),
            Self::InvalidValue { name, value } => {
                write!(f, "invalid value for setting `{name}`: `{value}`")
            }
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
