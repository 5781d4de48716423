//! Per-module state and convenience forwarding.

use super::{ModuleHandle, ModuleResult};
use crate::command::{CommandArgs, CommandCallback, CommandEntry, CompletionFn};
use crate::host::{Console, HostContext, ParamSetError, SayPriority};
use crate::params::ParamCache;
use crate::settings::Settings;
use crate::state::Status;
use crate::telemetry::LinkDescriptor;
use crate::units;
use crate::vehicle::VehicleType;
use log::debug;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::rc::Rc;
use uuid::Uuid;

/// State shared by every module plus forwarding helpers to the host.
///
/// Concrete modules embed a `ModuleBase` and return it from
/// [`Module::base`](super::Module::base).
pub struct ModuleBase {
    ctx: Rc<dyn HostContext>,
    name: String,
    description: String,
    public: bool,
    needs_unloading: bool,
    unloaded: bool,
    instance_id: Uuid,
}

impl ModuleBase {
    /// Creates a private module named `name` with description
    /// `"<name> handling"`.
    pub fn new(ctx: Rc<dyn HostContext>, name: impl Into<String>) -> Self {
        let name = name.into();
        let description = format!("{name} handling");
        Self {
            ctx,
            name,
            description,
            public: false,
            needs_unloading: false,
            unloaded: false,
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares the module public. The host registers it after construction.
    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn needs_unloading(&self) -> bool {
        self.needs_unloading
    }

    /// Asks the host to unload this module on its next pass.
    pub fn request_unload(&mut self) {
        self.needs_unloading = true;
    }

    pub(crate) fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    pub(crate) fn mark_unloaded(&mut self) {
        self.unloaded = true;
    }

    pub fn context(&self) -> &Rc<dyn HostContext> {
        &self.ctx
    }

    /// Finds a public module by name.
    pub fn find_module(&self, name: &str) -> ModuleResult<ModuleHandle> {
        self.ctx.find_module(name)
    }

    pub fn console(&self) -> Rc<dyn Console> {
        self.ctx.console()
    }

    pub fn status(&self) -> Status {
        self.ctx.status()
    }

    pub fn param_cache(&self) -> ParamCache {
        self.ctx.param_cache()
    }

    pub fn settings(&self) -> Settings {
        self.ctx.settings()
    }

    pub fn vehicle_type(&self) -> Option<VehicleType> {
        self.ctx.vehicle_type()
    }

    pub fn vehicle_name(&self) -> Option<String> {
        self.ctx.vehicle_name()
    }

    pub fn sitl_output(&self) -> Option<String> {
        self.ctx.sitl_output()
    }

    pub fn target_system(&self) -> u8 {
        self.ctx.settings().target_system
    }

    pub fn target_component(&self) -> u8 {
        self.ctx.settings().target_component
    }

    pub fn primary_link(&self) -> Option<LinkDescriptor> {
        self.ctx.primary_link()
    }

    pub fn continue_mode(&self) -> bool {
        self.ctx.continue_mode()
    }

    pub fn log_directory(&self) -> Option<PathBuf> {
        self.ctx.status().log_dir
    }

    /// Sends an important notification to the user.
    pub fn say(&self, message: &str) {
        self.say_with_priority(message, SayPriority::default());
    }

    pub fn say_with_priority(&self, message: &str, priority: SayPriority) {
        self.ctx.say(message, priority);
    }

    /// Returns the cached parameter value, or `default` when it is absent.
    pub fn get_param(&self, name: &str, default: Option<f64>) -> Option<f64> {
        self.ctx.get_param(name).or(default)
    }

    /// Requests a parameter write with the `param_retries` attempt budget.
    pub fn set_param(&self, name: &str, value: f64) -> Result<(), ParamSetError> {
        let retries = self.ctx.settings().param_retries;
        self.set_param_with_retries(name, value, retries)
    }

    /// Requests a parameter write; the host's outcome is passed through.
    pub fn set_param_with_retries(
        &self,
        name: &str,
        value: f64,
        retries: u32,
    ) -> Result<(), ParamSetError> {
        debug!(
            "event=param_set_request module={} status=start name={} value={} retries={}",
            self.name, name, value, retries
        );
        self.ctx.set_param(name, value, retries)
    }

    /// Registers a console command owned by this module.
    pub fn add_command<F>(
        &self,
        name: &str,
        callback: F,
        description: &str,
        completions: Option<Vec<String>>,
    ) where
        F: Fn(&CommandArgs) + 'static,
    {
        self.add_command_callback(name, Rc::new(callback), description, completions);
    }

    /// Registers an already shared callback, overwriting any entry for `name`.
    pub fn add_command_callback(
        &self,
        name: &str,
        callback: CommandCallback,
        description: &str,
        completions: Option<Vec<String>>,
    ) {
        debug!(
            "event=command_register module={} status=ok command={}",
            self.name, name
        );
        let entry = CommandEntry::new(callback, description);
        self.ctx.add_command(name, entry, completions);
    }

    pub fn add_completion_function<F>(&self, name: &str, callback: F)
    where
        F: Fn(&str) -> Vec<String> + 'static,
    {
        let callback: CompletionFn = Rc::new(callback);
        self.ctx.add_completion_function(name, callback);
    }

    pub fn dist_string(&self, meters: f64) -> String {
        units::dist_string(&self.settings(), meters)
    }

    pub fn height_string(&self, meters: f64) -> String {
        units::height_string(&self.settings(), meters)
    }

    pub fn speed_string(&self, meters_per_second: f64) -> String {
        units::speed_string(&self.settings(), meters_per_second)
    }
}

impl Debug for ModuleBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleBase")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("public", &self.public)
            .field("needs_unloading", &self.needs_unloading)
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}
