use groundlink_core::{HostContext, LinkDescriptor, SharedState, TelemetryPacket, VehicleType};
use mavlink::common::{
    MavAutopilot, MavMessage, MavModeFlag, MavParamType, MavState, MavType, HEARTBEAT_DATA,
    PARAM_VALUE_DATA,
};
use mavlink::MavHeader;

fn header(system_id: u8) -> MavHeader {
    MavHeader {
        system_id,
        component_id: 1,
        sequence: 0,
    }
}

fn heartbeat(mavtype: MavType, base_mode: MavModeFlag, custom_mode: u32) -> MavMessage {
    MavMessage::HEARTBEAT(HEARTBEAT_DATA {
        custom_mode,
        mavtype,
        autopilot: MavAutopilot::MAV_AUTOPILOT_ARDUPILOTMEGA,
        base_mode,
        system_status: MavState::MAV_STATE_ACTIVE,
        mavlink_version: 3,
    })
}

fn param_value(name: &str, value: f32) -> MavMessage {
    let mut param_id = [0u8; 16];
    param_id[..name.len()].copy_from_slice(name.as_bytes());
    MavMessage::PARAM_VALUE(PARAM_VALUE_DATA {
        param_value: value,
        param_count: 1,
        param_index: 0,
        param_id,
        param_type: MavParamType::MAV_PARAM_TYPE_REAL32,
    })
}

#[test]
fn record_packet_tracks_vehicle_heartbeats() {
    let state = SharedState::builder().build();
    let vehicle = TelemetryPacket::new(
        0,
        header(1),
        heartbeat(
            MavType::MAV_TYPE_GROUND_ROVER,
            MavModeFlag::MAV_MODE_FLAG_SAFETY_ARMED,
            10,
        ),
    );
    let other_gcs = TelemetryPacket::new(
        0,
        header(255),
        heartbeat(MavType::MAV_TYPE_GCS, MavModeFlag::empty(), 0),
    );

    state.record_packet(&vehicle);
    state.record_packet(&other_gcs);

    let status = state.status();
    assert_eq!(status.packets_received, 2);
    assert_eq!(status.heartbeats_received, 1);
    assert_eq!(status.message_count("HEARTBEAT"), 2);
    assert_eq!(status.last_message, Some("HEARTBEAT"));
    assert!(status.armed);
    assert_eq!(status.custom_mode, Some(10));
    assert_eq!(state.vehicle_type(), Some(VehicleType::Rover));
}

#[test]
fn record_packet_fills_param_cache() {
    let state = SharedState::builder().build();
    state.record_packet(&TelemetryPacket::new(
        0,
        header(1),
        param_value("CRUISE_SPEED", 2.5),
    ));

    assert_eq!(state.get_param("CRUISE_SPEED"), Some(2.5));
    assert_eq!(state.status().message_count("PARAM_VALUE"), 1);
}

#[test]
fn primary_link_follows_link_setting() {
    let state = SharedState::builder()
        .link(LinkDescriptor::new(0, "udpin:0.0.0.0:14550"))
        .link(LinkDescriptor::new(1, "/dev/ttyACM0").with_label("usb"))
        .build();
    assert_eq!(state.primary_link().expect("link").id, 0);

    state
        .update_settings(|settings| settings.set("link", "2"))
        .expect("link 2 is valid");
    assert_eq!(state.primary_link().expect("link").id, 1);

    state.update_settings(|settings| settings.link = 9);
    assert_eq!(state.primary_link().expect("link").id, 0);
}

#[test]
fn primary_link_is_none_without_links() {
    let state = SharedState::builder().build();
    assert!(state.primary_link().is_none());
    state.add_link(LinkDescriptor::new(0, "tcp:127.0.0.1:5760"));
    assert_eq!(state.links().len(), 1);
    assert_eq!(
        state.primary_link().expect("link").address,
        "tcp:127.0.0.1:5760"
    );
}

#[test]
fn unregister_module_frees_the_name() {
    let state = SharedState::builder().build();
    let first = groundlink_core::into_handle(
        groundlink_core::ModuleBase::new(state.context(), "map").public(),
    );
    state.register_module(&first).expect("register");
    assert!(state.unregister_module("map").is_some());
    assert!(state.unregister_module("map").is_none());

    let second = groundlink_core::into_handle(
        groundlink_core::ModuleBase::new(state.context(), "map").public(),
    );
    assert!(state.register_module(&second).expect("name is free again"));
    assert_eq!(state.public_module_names(), ["map"]);
}
