//! Received telemetry packets and link descriptors.
//!
//! # Responsibility
//! - Wrap one decoded MAVLink message with the link it arrived on.
//! - Describe the connected links a module may address.
//!
//! # Invariants
//! - `message` is the closed `MavMessage` enum; handlers match on variants
//!   instead of inspecting type names.

use mavlink::common::MavMessage;
use mavlink::{MavHeader, Message};
use serde::{Deserialize, Serialize};

/// Zero-based index of a link in the host's link list.
pub type LinkId = usize;

/// One decoded MAVLink packet as delivered to `Module::mavlink_packet`.
#[derive(Debug, Clone)]
pub struct TelemetryPacket {
    pub link_id: LinkId,
    pub header: MavHeader,
    pub message: MavMessage,
}

impl TelemetryPacket {
    pub fn new(link_id: LinkId, header: MavHeader, message: MavMessage) -> Self {
        Self {
            link_id,
            header,
            message,
        }
    }

    /// MAVLink message name, e.g. `HEARTBEAT`.
    pub fn message_name(&self) -> &'static str {
        self.message.message_name()
    }

    pub fn message_id(&self) -> u32 {
        self.message.message_id()
    }

    pub fn source_system(&self) -> u8 {
        self.header.system_id
    }

    pub fn source_component(&self) -> u8 {
        self.header.component_id
    }
}

/// Descriptor of one connected telemetry link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub id: LinkId,
    /// Connection string, e.g. `udpin:0.0.0.0:14550`.
    pub address: String,
    pub label: Option<String>,
}

impl LinkDescriptor {
    pub fn new(id: LinkId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Decodes a fixed-size, NUL-padded MAVLink parameter id.
pub fn decode_param_id(raw: &[u8]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{decode_param_id, LinkDescriptor, TelemetryPacket};
    use mavlink::common::{
        MavAutopilot, MavMessage, MavModeFlag, MavState, MavType, HEARTBEAT_DATA,
    };
    use mavlink::MavHeader;

    fn heartbeat() -> MavMessage {
        MavMessage::HEARTBEAT(HEARTBEAT_DATA {
            custom_mode: 0,
            mavtype: MavType::MAV_TYPE_QUADROTOR,
            autopilot: MavAutopilot::MAV_AUTOPILOT_ARDUPILOTMEGA,
            base_mode: MavModeFlag::empty(),
            system_status: MavState::MAV_STATE_STANDBY,
            mavlink_version: 3,
        })
    }

    #[test]
    fn exposes_message_and_header_fields() {
        let header = MavHeader {
            system_id: 1,
            component_id: 1,
            sequence: 42,
        };
        let packet = TelemetryPacket::new(0, header, heartbeat());
        assert_eq!(packet.message_name(), "HEARTBEAT");
        assert_eq!(packet.message_id(), 0);
        assert_eq!(packet.source_system(), 1);
        assert_eq!(packet.source_component(), 1);
    }

    #[test]
    fn decodes_padded_param_ids() {
        let mut raw = [0u8; 16];
        raw[..12].copy_from_slice(b"ARMING_CHECK");
        assert_eq!(decode_param_id(&raw), "ARMING_CHECK");

        let full = *b"ABCDEFGHIJKLMNOP";
        assert_eq!(decode_param_id(&full), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn link_descriptor_builder() {
        let link = LinkDescriptor::new(0, "udpin:0.0.0.0:14550").with_label("sitl");
        assert_eq!(link.label.as_deref(), Some("sitl"));
    }
}
