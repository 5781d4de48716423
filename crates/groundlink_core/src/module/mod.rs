//! Module base contract.
//!
//! # Responsibility
//! - Define the [`Module`] trait: the hooks the host invokes on every loaded
//!   module, each with a no-op default.
//! - Provide [`ModuleBase`], the per-module state and convenience forwarding
//!   to the host context.
//! - Keep the registry of public modules discoverable by name.
//!
//! # Invariants
//! - Construction has no side effects; public registration is a separate host
//!   step.
//! - A public name resolves to exactly one live instance until the host
//!   removes it or drops that instance.
//! - The public registry never owns modules; dropping the host's handles and
//!   state frees everything.
//! - `needs_unloading` starts `false` and, once set, is never reset.

use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

mod base;
mod contract;
pub mod registry;

pub use base::ModuleBase;
pub use contract::Module;
pub use registry::PublicModuleRegistry;

/// Shared handle to a loaded module instance.
pub type ModuleHandle = Rc<RefCell<dyn Module>>;

pub type ModuleResult<T> = Result<T, ModuleError>;

/// Wraps a concrete module into a shareable handle.
pub fn into_handle<M: Module + 'static>(module: M) -> ModuleHandle {
    Rc::new(RefCell::new(module))
}

/// Module lookup and registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleError {
    NotFound(String),
    DuplicateModuleName(String),
    InvalidModuleName(String),
}

impl Display for ModuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "public module not found: {name}"),
            Self::DuplicateModuleName(name) => {
                write!(f, "public module already registered: {name}")
            }
            Self::InvalidModuleName(name) => write!(f, "module name is invalid: `{name}`"),
        }
    }
}

impl Error for ModuleError {}
