//! Overridable module hooks.

use super::base::ModuleBase;
use crate::command::CommandArgs;
use crate::telemetry::TelemetryPacket;

/// Contract every loaded module implements.
///
/// The host calls hooks synchronously, one at a time. Hook bodies must
/// return promptly: a blocking hook stalls the whole host loop.
pub trait Module {
    fn base(&self) -> &ModuleBase;
    fn base_mut(&mut self) -> &mut ModuleBase;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn description(&self) -> &str {
        self.base().description()
    }

    /// Called on every idle cycle of the host loop.
    fn idle_task(&mut self) {}

    /// Called once when the host removes the module; release timers and
    /// subscriptions here.
    fn unload(&mut self) {}

    /// Offered a command no registered entry matched.
    ///
    /// Returns `true` when this module handled it.
    fn unknown_command(&mut self, _args: &CommandArgs) -> bool {
        false
    }

    /// Called once per received packet. Any message type may arrive.
    fn mavlink_packet(&mut self, _packet: &TelemetryPacket) {}
}

/// A bare base is itself a module with every hook left at its default.
impl Module for ModuleBase {
    fn base(&self) -> &ModuleBase {
        self
    }

    fn base_mut(&mut self) -> &mut ModuleBase {
        self
    }
}
