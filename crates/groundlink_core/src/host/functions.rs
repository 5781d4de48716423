//! Host-provided side-effecting functions.
//!
//! # Responsibility
//! - Deliver user-facing notifications.
//! - Send parameter writes to the vehicle.
//!
//! # Invariants
//! - `say` is fire-and-forget.
//! - `param_set` owns retry behavior; callers only pass the attempt budget.

use crate::params::ParamCache;
use log::info;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Default attempt budget for parameter writes.
pub const DEFAULT_PARAM_RETRIES: u32 = 3;

/// Notification urgency passed to [`HostFunctions::say`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SayPriority {
    #[default]
    Important,
    Notification,
}

impl SayPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Important => "important",
            Self::Notification => "notification",
        }
    }
}

/// Side-effecting functions the host lends to modules.
pub trait HostFunctions {
    fn say(&self, message: &str, priority: SayPriority);

    /// Requests a parameter write with up to `retries` attempts.
    fn param_set(&self, name: &str, value: f64, retries: u32) -> Result<(), ParamSetError>;
}

/// Host functions for a process with no vehicle link.
///
/// Notifications go to the log. Parameter writes land in the shared cache
/// immediately, as if the vehicle had acknowledged them.
#[derive(Debug, Clone)]
pub struct LoggingHostFunctions {
    params: Rc<RefCell<ParamCache>>,
}

impl LoggingHostFunctions {
    pub fn new(params: Rc<RefCell<ParamCache>>) -> Self {
        Self { params }
    }
}

impl HostFunctions for LoggingHostFunctions {
    fn say(&self, message: &str, priority: SayPriority) {
        info!(
            "event=say module=host status=ok priority={} message={}",
            priority.as_str(),
            message
        );
    }

    fn param_set(&self, name: &str, value: f64, retries: u32) -> Result<(), ParamSetError> {
        self.params.borrow_mut().insert(name, value);
        info!(
            "event=param_set module=host status=ok mode=offline name={} value={} retries={}",
            name, value, retries
        );
        Ok(())
    }
}

/// Parameter write failures reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSetError {
    LinkUnavailable(String),
    RetriesExhausted { name: String, retries: u32 },
    Rejected { name: String, reason: String },
}

impl Display for ParamSetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinkUnavailable(name) => {
                write!(f, "cannot set parameter {name}: no vehicle link")
            }
            Self::RetriesExhausted { name, retries } => {
                write!(f, "parameter {name} not acknowledged after {retries} attempts")
            }
            Self::Rejected { name, reason } => {
                write!(f, "parameter {name} rejected by vehicle: {reason}")
            }
        }
    }
}

impl Error for ParamSetError {}

#[cfg(test)]
mod tests {
    use super::{HostFunctions, LoggingHostFunctions, ParamSetError, SayPriority};
    use crate::params::ParamCache;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn default_priority_is_important() {
        assert_eq!(SayPriority::default(), SayPriority::Important);
        assert_eq!(SayPriority::default().as_str(), "important");
    }

    #[test]
    fn offline_param_set_writes_into_cache() {
        let params = Rc::new(RefCell::new(ParamCache::new()));
        let functions = LoggingHostFunctions::new(Rc::clone(&params));

        functions
            .param_set("arming_check", 0.0, 3)
            .expect("offline writes always succeed");
        functions.say("armed", SayPriority::Notification);

        assert_eq!(params.borrow().get("ARMING_CHECK"), Some(0.0));
        assert_eq!(params.borrow().len(), 1);
    }

    #[test]
    fn param_set_errors_name_the_parameter() {
        let err = ParamSetError::LinkUnavailable("ARMING_CHECK".to_string());
        assert!(err.to_string().contains("ARMING_CHECK"));
        assert!(err.to_string().contains("no vehicle link"));
    }
}
