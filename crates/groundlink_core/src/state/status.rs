//! Link and vehicle status counters.

use crate::telemetry::TelemetryPacket;
use mavlink::common::{MavMessage, MavModeFlag, MavType};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Status record updated by the host as packets arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Directory holding telemetry logs for this session.
    pub log_dir: Option<PathBuf>,
    pub packets_received: u64,
    pub heartbeats_received: u64,
    pub last_message: Option<&'static str>,
    /// Received count per message name.
    pub message_counts: BTreeMap<&'static str, u64>,
    pub armed: bool,
    /// Autopilot-specific flight mode number from the last vehicle HEARTBEAT.
    pub custom_mode: Option<u32>,
}

impl Status {
    /// Folds one packet into the counters.
    ///
    /// Arming state and mode only follow HEARTBEATs from vehicles, not from
    /// other ground stations on the same link.
    pub fn record(&mut self, packet: &TelemetryPacket) {
        let name = packet.message_name();
        self.packets_received += 1;
        self.last_message = Some(name);
        *self.message_counts.entry(name).or_insert(0) += 1;

        if let MavMessage::HEARTBEAT(data) = &packet.message {
            if data.mavtype == MavType::MAV_TYPE_GCS {
                return;
            }
            self.heartbeats_received += 1;
            self.armed = data
                .base_mode
                .contains(MavModeFlag::MAV_MODE_FLAG_SAFETY_ARMED);
            self.custom_mode = Some(data.custom_mode);
        }
    }

    pub fn message_count(&self, name: &str) -> u64 {
        self.message_counts.get(name).copied().unwrap_or(0)
    }
}
