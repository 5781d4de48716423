//! Vehicle identity as learned from the link.

use mavlink::common::MavType;
use serde::{Deserialize, Serialize};

/// Vehicle class used by modules to select behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Copter,
    Plane,
    Rover,
    Sub,
    AntennaTracker,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copter => "copter",
            Self::Plane => "plane",
            Self::Rover => "rover",
            Self::Sub => "sub",
            Self::AntennaTracker => "antenna_tracker",
        }
    }

    /// Maps a HEARTBEAT `type` to a vehicle class.
    ///
    /// Returns `None` for GCS, companion and other non-vehicle components.
    pub fn from_mav_type(mav_type: MavType) -> Option<Self> {
        match mav_type {
            MavType::MAV_TYPE_QUADROTOR
            | MavType::MAV_TYPE_HEXAROTOR
            | MavType::MAV_TYPE_OCTOROTOR
            | MavType::MAV_TYPE_TRICOPTER
            | MavType::MAV_TYPE_COAXIAL
            | MavType::MAV_TYPE_HELICOPTER => Some(Self::Copter),
            MavType::MAV_TYPE_FIXED_WING => Some(Self::Plane),
            MavType::MAV_TYPE_GROUND_ROVER | MavType::MAV_TYPE_SURFACE_BOAT => Some(Self::Rover),
            MavType::MAV_TYPE_SUBMARINE => Some(Self::Sub),
            MavType::MAV_TYPE_ANTENNA_TRACKER => Some(Self::AntennaTracker),
            _ => None,
        }
    }
}

/// Type and display name of the connected vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleIdentity {
    pub vehicle_type: Option<VehicleType>,
    pub vehicle_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::VehicleType;
    use mavlink::common::MavType;

    #[test]
    fn classifies_common_frames() {
        assert_eq!(
            VehicleType::from_mav_type(MavType::MAV_TYPE_QUADROTOR),
            Some(VehicleType::Copter)
        );
        assert_eq!(
            VehicleType::from_mav_type(MavType::MAV_TYPE_FIXED_WING),
            Some(VehicleType::Plane)
        );
        assert_eq!(
            VehicleType::from_mav_type(MavType::MAV_TYPE_SURFACE_BOAT),
            Some(VehicleType::Rover)
        );
        assert_eq!(VehicleType::from_mav_type(MavType::MAV_TYPE_GCS), None);
    }

    #[test]
    fn string_ids_are_stable() {
        assert_eq!(VehicleType::AntennaTracker.as_str(), "antenna_tracker");
        assert_eq!(VehicleType::Copter.as_str(), "copter");
    }
}
