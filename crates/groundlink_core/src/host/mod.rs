//! Capabilities the host application lends to modules.
//!
//! # Responsibility
//! - Define the narrow [`HostContext`] interface every module is built with.
//! - Define the console sink and host functions (notifications, parameter
//!   writes) that sit behind that interface.
//!
//! # Invariants
//! - Modules reach shared state only through `HostContext`.
//! - Public module registration is not part of `HostContext`; only the host
//!   registers modules.

pub mod console;
pub mod context;
pub mod functions;

pub use console::{Console, LogConsole, MemoryConsole};
pub use context::HostContext;
pub use functions::{
    HostFunctions, LoggingHostFunctions, ParamSetError, SayPriority, DEFAULT_PARAM_RETRIES,
};
