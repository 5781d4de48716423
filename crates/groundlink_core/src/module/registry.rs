//! Registry of public modules, keyed by name.
//!
//! Entries are weak: the host owns loaded modules, and every module holds its
//! host context, so a strong entry here would keep both alive forever.

use super::{Module, ModuleError, ModuleHandle, ModuleResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

type WeakModule = Weak<RefCell<dyn Module>>;

/// Name to instance map of modules other modules may look up.
#[derive(Default)]
pub struct PublicModuleRegistry {
    modules: BTreeMap<String, WeakModule>,
}

impl PublicModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle` under `name`.
    ///
    /// A name bound to a live instance is rejected rather than replaced, so a
    /// name keeps resolving to the same instance until [`Self::remove`]. An
    /// entry whose instance was dropped counts as free.
    pub fn register(&mut self, name: &str, handle: &ModuleHandle) -> ModuleResult<()> {
        let name = name.trim();
        if !is_valid_module_name(name) {
            return Err(ModuleError::InvalidModuleName(name.to_string()));
        }
        if self.contains(name) {
            return Err(ModuleError::DuplicateModuleName(name.to_string()));
        }
        self.modules.insert(name.to_string(), Rc::downgrade(handle));
        Ok(())
    }

    pub fn get(&self, name: &str) -> ModuleResult<ModuleHandle> {
        let name = name.trim();
        self.modules
            .get(name)
            .and_then(Weak::upgrade)
            .ok_or_else(|| ModuleError::NotFound(name.to_string()))
    }

    /// Removes `name`, returning the instance when it is still alive.
    pub fn remove(&mut self, name: &str) -> Option<ModuleHandle> {
        self.modules
            .remove(name.trim())
            .and_then(|entry| entry.upgrade())
    }

    /// Removes `name` only when it is bound to exactly `handle`.
    pub fn remove_instance(&mut self, name: &str, handle: &ModuleHandle) -> bool {
        let name = name.trim();
        let bound = self
            .modules
            .get(name)
            .and_then(Weak::upgrade)
            .is_some_and(|current| Rc::ptr_eq(&current, handle));
        if bound {
            self.modules.remove(name);
        }
        bound
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules
            .get(name.trim())
            .is_some_and(|entry| entry.strong_count() > 0)
    }

    /// Sorted names of public modules that are still alive.
    pub fn names(&self) -> Vec<String> {
        self.modules
            .iter()
            .filter(|(_, entry)| entry.strong_count() > 0)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Drops entries whose instance no longer exists.
    pub fn prune(&mut self) -> usize {
        let before = self.modules.len();
        self.modules.retain(|_, entry| entry.strong_count() > 0);
        before - self.modules.len()
    }

    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Debug for PublicModuleRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicModuleRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Module names are non-empty ASCII words: letters, digits, `_`, `-`, `.`.
pub fn is_valid_module_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::{is_valid_module_name, PublicModuleRegistry};
    use crate::module::{into_handle, ModuleError, ModuleHandle};
    use crate::state::SharedState;
    use crate::ModuleBase;
    use std::rc::Rc;

    fn handle(name: &str) -> ModuleHandle {
        let state = SharedState::builder().build();
        into_handle(ModuleBase::new(state.context(), name))
    }

    #[test]
    fn registers_and_resolves_same_instance() {
        let mut registry = PublicModuleRegistry::new();
        let map = handle("map");
        registry.register("map", &map).expect("map should register");

        let found = registry.get("map").expect("map should resolve");
        assert!(Rc::ptr_eq(&found, &map));
        assert_eq!(registry.names(), ["map"]);
    }

    #[test]
    fn rejects_duplicate_and_invalid_names() {
        let mut registry = PublicModuleRegistry::new();
        let wp = handle("wp");
        registry.register("wp", &wp).expect("first registration");
        let duplicate = registry.register("wp", &handle("wp"));
        assert_eq!(
            duplicate.err(),
            Some(ModuleError::DuplicateModuleName("wp".to_string()))
        );

        let invalid = registry.register("bad name", &handle("bad name"));
        assert!(matches!(invalid, Err(ModuleError::InvalidModuleName(_))));
        let blank = registry.register("   ", &handle("blank"));
        assert!(matches!(blank, Err(ModuleError::InvalidModuleName(_))));
    }

    #[test]
    fn missing_name_is_not_found() {
        let registry = PublicModuleRegistry::new();
        let err = registry.get("fence").err().expect("lookup must fail");
        assert_eq!(err, ModuleError::NotFound("fence".to_string()));
        assert!(err.to_string().contains("fence"));
    }

    #[test]
    fn remove_instance_ignores_other_instances() {
        let mut registry = PublicModuleRegistry::new();
        let registered = handle("rally");
        let impostor = handle("rally");
        registry.register("rally", &registered).expect("register");

        assert!(!registry.remove_instance("rally", &impostor));
        assert!(registry.contains("rally"));
        assert!(registry.remove_instance("rally", &registered));
        assert!(registry.is_empty());
    }

    #[test]
    fn dropped_instance_frees_its_name() {
        let mut registry = PublicModuleRegistry::new();
        let first = handle("terrain");
        registry.register("terrain", &first).expect("register");
        drop(first);

        assert!(!registry.contains("terrain"));
        assert!(registry.names().is_empty());
        assert!(matches!(
            registry.get("terrain"),
            Err(ModuleError::NotFound(_))
        ));

        let second = handle("terrain");
        registry
            .register("terrain", &second)
            .expect("dead entry does not block the name");
        assert_eq!(registry.prune(), 0);
        assert!(Rc::ptr_eq(
            &registry.get("terrain").expect("resolves"),
            &second
        ));
    }

    #[test]
    fn prune_drops_dead_entries() {
        let mut registry = PublicModuleRegistry::new();
        let kept = handle("map");
        registry.register("map", &kept).expect("register");
        registry.register("wp", &handle("wp")).expect("register");

        assert_eq!(registry.prune(), 1);
        assert_eq!(registry.names(), ["map"]);
    }

    #[test]
    fn module_name_rules() {
        assert!(is_valid_module_name("map"));
        assert!(is_valid_module_name("mode-switch"));
        assert!(is_valid_module_name("DGPS"));
        assert!(!is_valid_module_name(""));
        assert!(!is_valid_module_name("two words"));
    }
}
