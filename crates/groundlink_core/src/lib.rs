//! Module base contract for the groundlink ground control station.
//! Modules are built against a [`HostContext`] and registered by the host.

pub mod command;
pub mod db;
pub mod host;
pub mod logging;
pub mod module;
pub mod params;
pub mod settings;
pub mod state;
pub mod telemetry;
pub mod units;
pub mod vehicle;

pub use command::{CommandArgs, CommandCallback, CommandEntry, CommandTable, CompletionFn};
pub use host::{
    Console, HostContext, HostFunctions, LogConsole, LoggingHostFunctions, MemoryConsole,
    ParamSetError, SayPriority, DEFAULT_PARAM_RETRIES,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use module::{
    into_handle, Module, ModuleBase, ModuleError, ModuleHandle, ModuleResult, PublicModuleRegistry,
};
pub use params::{ParamCache, ParamSnapshot, ParamStore};
pub use settings::{DistUnit, HeightUnit, Settings, SettingsError, SpeedUnit};
pub use state::{SharedState, SharedStateBuilder, Status};
pub use telemetry::{LinkDescriptor, LinkId, TelemetryPacket};
pub use vehicle::{VehicleIdentity, VehicleType};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
