//! The capability interface injected into every module.

use crate::command::{CommandEntry, CompletionFn};
use crate::host::console::Console;
use crate::host::functions::{ParamSetError, SayPriority};
use crate::module::{ModuleHandle, ModuleResult};
use crate::params::ParamCache;
use crate::settings::Settings;
use crate::state::Status;
use crate::telemetry::LinkDescriptor;
use crate::vehicle::VehicleType;
use std::rc::Rc;

/// Read access to shared state plus the few registries a module may write.
///
/// Every getter is a projection taken at call time; nothing is cached on the
/// module side. Implementations must not hold interior borrows across calls
/// into modules or callbacks.
pub trait HostContext {
    /// Looks up a public module by name.
    fn find_module(&self, name: &str) -> ModuleResult<ModuleHandle>;

    fn console(&self) -> Rc<dyn Console>;
    fn status(&self) -> Status;
    fn param_cache(&self) -> ParamCache;
    fn get_param(&self, name: &str) -> Option<f64>;
    fn settings(&self) -> Settings;
    fn vehicle_type(&self) -> Option<VehicleType>;
    fn vehicle_name(&self) -> Option<String>;
    fn sitl_output(&self) -> Option<String>;
    fn primary_link(&self) -> Option<LinkDescriptor>;
    fn continue_mode(&self) -> bool;

    fn say(&self, message: &str, priority: SayPriority);
    fn set_param(&self, name: &str, value: f64, retries: u32) -> Result<(), ParamSetError>;

    /// Inserts or overwrites a command map entry.
    fn add_command(&self, name: &str, entry: CommandEntry, completions: Option<Vec<String>>);
    /// Inserts or overwrites a completion function.
    fn add_completion_function(&self, name: &str, callback: CompletionFn);
}
