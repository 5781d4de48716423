//! Shared application state.
//!
//! # Responsibility
//! - Own settings, status, parameter cache, links, vehicle identity, the
//!   public module registry and the command tables for the whole process.
//! - Implement [`HostContext`] so modules can read that state.
//! - Offer host-only operations: public registration, teardown, packet
//!   bookkeeping.
//!
//! # Invariants
//! - The state lives in an `Rc` and is `!Send`; hooks and callbacks run on the
//!   host thread only. Any future concurrent execution needs host-level locking.
//! - No `RefCell` borrow is held while a module hook or callback runs.

use crate::command::{CommandEntry, CommandTable, CompletionFn};
use crate::host::{
    Console, HostContext, HostFunctions, LogConsole, LoggingHostFunctions, ParamSetError,
    SayPriority,
};
use crate::module::{ModuleHandle, ModuleResult, PublicModuleRegistry};
use crate::params::ParamCache;
use crate::settings::Settings;
use crate::telemetry::{decode_param_id, LinkDescriptor, TelemetryPacket};
use crate::vehicle::{VehicleIdentity, VehicleType};
use log::{info, warn};
use mavlink::common::MavMessage;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::rc::Rc;

mod status;

pub use status::Status;

/// Process-wide state every module is constructed against.
pub struct SharedState {
    settings: RefCell<Settings>,
    status: RefCell<Status>,
    params: Rc<RefCell<ParamCache>>,
    vehicle: RefCell<VehicleIdentity>,
    links: RefCell<Vec<LinkDescriptor>>,
    public_modules: RefCell<PublicModuleRegistry>,
    commands: RefCell<CommandTable>,
    console: Rc<dyn Console>,
    functions: Rc<dyn HostFunctions>,
    sitl_output: Option<String>,
    continue_mode: bool,
}

impl SharedState {
    pub fn builder() -> SharedStateBuilder {
        SharedStateBuilder::default()
    }

    /// Returns this state as the capability interface handed to modules.
    pub fn context(self: &Rc<Self>) -> Rc<dyn HostContext> {
        Rc::clone(self) as Rc<dyn HostContext>
    }

    /// Registers a module that declared itself public.
    ///
    /// Returns `Ok(false)` and leaves the registry untouched for private
    /// modules.
    pub fn register_module(&self, handle: &ModuleHandle) -> ModuleResult<bool> {
        let (name, public, instance_id) = {
            let module = handle.borrow();
            let base = module.base();
            (base.name().to_string(), base.is_public(), base.instance_id())
        };
        if !public {
            return Ok(false);
        }

        self.public_modules
            .borrow_mut()
            .register(&name, handle)?;
        info!(
            "event=module_register module=registry status=ok name={} instance_id={}",
            name, instance_id
        );
        Ok(true)
    }

    pub fn unregister_module(&self, name: &str) -> Option<ModuleHandle> {
        let removed = self.public_modules.borrow_mut().remove(name);
        if removed.is_some() {
            info!("event=module_unregister module=registry status=ok name={name}");
        }
        removed
    }

    /// Runs the module's `unload` hook and drops its public registration.
    ///
    /// Returns `false` without calling the hook when the instance was
    /// already unloaded.
    pub fn unload_module(&self, handle: &ModuleHandle) -> bool {
        let mut module = handle.borrow_mut();
        if module.base().is_unloaded() {
            warn!(
                "event=module_unload module=registry status=skipped name={} reason=already_unloaded",
                module.name()
            );
            return false;
        }
        module.unload();
        module.base_mut().mark_unloaded();

        let name = module.name().to_string();
        drop(module);
        self.public_modules
            .borrow_mut()
            .remove_instance(&name, handle);
        info!("event=module_unload module=registry status=ok name={name}");
        true
    }

    pub fn public_module_names(&self) -> Vec<String> {
        self.public_modules.borrow().names()
    }

    /// Applies `edit` to the settings record.
    pub fn update_settings<R>(&self, edit: impl FnOnce(&mut Settings) -> R) -> R {
        edit(&mut self.settings.borrow_mut())
    }

    pub fn set_vehicle_name(&self, name: Option<String>) {
        self.vehicle.borrow_mut().vehicle_name = name;
    }

    pub fn set_log_dir(&self, log_dir: Option<PathBuf>) {
        self.status.borrow_mut().log_dir = log_dir;
    }

    pub fn add_link(&self, link: LinkDescriptor) {
        self.links.borrow_mut().push(link);
    }

    pub fn links(&self) -> Vec<LinkDescriptor> {
        self.links.borrow().clone()
    }

    /// Stores a parameter value reported by the vehicle.
    pub fn update_param(&self, name: &str, value: f64) -> Option<f64> {
        self.params.borrow_mut().insert(name, value)
    }

    /// Folds a received packet into status, vehicle identity and the
    /// parameter cache before modules see it.
    pub fn record_packet(&self, packet: &TelemetryPacket) {
        self.status.borrow_mut().record(packet);

        match &packet.message {
            MavMessage::HEARTBEAT(data) => {
                if let Some(vehicle_type) = VehicleType::from_mav_type(data.mavtype) {
                    let mut vehicle = self.vehicle.borrow_mut();
                    if vehicle.vehicle_type != Some(vehicle_type) {
                        info!(
                            "event=vehicle_detected module=state status=ok type={} system={}",
                            vehicle_type.as_str(),
                            packet.source_system()
                        );
                        vehicle.vehicle_type = Some(vehicle_type);
                    }
                }
            }
            MavMessage::PARAM_VALUE(data) => {
                let name = decode_param_id(&data.param_id);
                if !name.is_empty() {
                    self.update_param(&name, f64::from(data.param_value));
                }
            }
            _ => {}
        }
    }

    pub fn command(&self, name: &str) -> Option<CommandEntry> {
        self.commands.borrow().command(name)
    }

    pub fn completions(&self, name: &str) -> Option<Vec<String>> {
        self.commands.borrow().completions(name)
    }

    pub fn completion_function(&self, name: &str) -> Option<CompletionFn> {
        self.commands.borrow().completion_function(name)
    }

    pub fn command_names(&self) -> Vec<String> {
        self.commands.borrow().command_names()
    }
}

impl HostContext for SharedState {
    fn find_module(&self, name: &str) -> ModuleResult<ModuleHandle> {
        self.public_modules.borrow().get(name)
    }

    fn console(&self) -> Rc<dyn Console> {
        Rc::clone(&self.console)
    }

    fn status(&self) -> Status {
        self.status.borrow().clone()
    }

    fn param_cache(&self) -> ParamCache {
        self.params.borrow().clone()
    }

    fn get_param(&self, name: &str) -> Option<f64> {
        self.params.borrow().get(name)
    }

    fn settings(&self) -> Settings {
        self.settings.borrow().clone()
    }

    fn vehicle_type(&self) -> Option<VehicleType> {
        self.vehicle.borrow().vehicle_type
    }

    fn vehicle_name(&self) -> Option<String> {
        self.vehicle.borrow().vehicle_name.clone()
    }

    fn sitl_output(&self) -> Option<String> {
        self.sitl_output.clone()
    }

    /// The link selected by the 1-based `link` setting, falling back to the
    /// first link when the setting is out of range.
    fn primary_link(&self) -> Option<LinkDescriptor> {
        let links = self.links.borrow();
        let selected = usize::try_from(self.settings.borrow().link)
            .ok()
            .and_then(|link| link.checked_sub(1));
        selected
            .and_then(|index| links.get(index))
            .or_else(|| links.first())
            .cloned()
    }

    fn continue_mode(&self) -> bool {
        self.continue_mode
    }

    fn say(&self, message: &str, priority: SayPriority) {
        self.functions.say(message, priority);
    }

    fn set_param(&self, name: &str, value: f64, retries: u32) -> Result<(), ParamSetError> {
        self.functions.param_set(name, value, retries)
    }

    fn add_command(&self, name: &str, entry: CommandEntry, completions: Option<Vec<String>>) {
        self.commands
            .borrow_mut()
            .add_command(name, entry, completions);
    }

    fn add_completion_function(&self, name: &str, callback: CompletionFn) {
        self.commands
            .borrow_mut()
            .add_completion_function(name, callback);
    }
}

impl Debug for SharedState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedState")
            .field("settings", &self.settings)
            .field("status", &self.status)
            .field("vehicle", &self.vehicle)
            .field("links", &self.links)
            .field("public_modules", &self.public_modules)
            .field("commands", &self.commands)
            .field("sitl_output", &self.sitl_output)
            .field("continue_mode", &self.continue_mode)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SharedState`].
#[derive(Default)]
pub struct SharedStateBuilder {
    settings: Settings,
    params: ParamCache,
    vehicle: VehicleIdentity,
    links: Vec<LinkDescriptor>,
    log_dir: Option<PathBuf>,
    console: Option<Rc<dyn Console>>,
    functions: Option<Rc<dyn HostFunctions>>,
    sitl_output: Option<String>,
    continue_mode: bool,
}

impl SharedStateBuilder {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Seeds the parameter cache, e.g. from a stored snapshot.
    pub fn params(mut self, params: ParamCache) -> Self {
        self.params = params;
        self
    }

    pub fn vehicle_name(mut self, name: impl Into<String>) -> Self {
        self.vehicle.vehicle_name = Some(name.into());
        self
    }

    pub fn link(mut self, link: LinkDescriptor) -> Self {
        self.links.push(link);
        self
    }

    pub fn log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn console(mut self, console: Rc<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    /// Replaces the default [`LoggingHostFunctions`], which write parameters
    /// straight into this state's cache.
    pub fn functions(mut self, functions: Rc<dyn HostFunctions>) -> Self {
        self.functions = Some(functions);
        self
    }

    pub fn sitl_output(mut self, address: impl Into<String>) -> Self {
        self.sitl_output = Some(address.into());
        self
    }

    pub fn continue_mode(mut self, enabled: bool) -> Self {
        self.continue_mode = enabled;
        self
    }

    pub fn build(self) -> Rc<SharedState> {
        let status = Status {
            log_dir: self.log_dir,
            ..Status::default()
        };
        let params = Rc::new(RefCell::new(self.params));
        let functions = self.functions.unwrap_or_else(|| {
            Rc::new(LoggingHostFunctions::new(Rc::clone(&params))) as Rc<dyn HostFunctions>
        });
        Rc::new(SharedState {
            settings: RefCell::new(self.settings),
            status: RefCell::new(status),
            params,
            vehicle: RefCell::new(self.vehicle),
            links: RefCell::new(self.links),
            public_modules: RefCell::new(PublicModuleRegistry::new()),
            commands: RefCell::new(CommandTable::new()),
            console: self.console.unwrap_or_else(|| Rc::new(LogConsole)),
            functions,
            sitl_output: self.sitl_output,
            continue_mode: self.continue_mode,
        })
    }
}
