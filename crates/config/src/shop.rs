//! Per-shop configuration aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopforge_core::{ConfigError, ConfigResult, ModuleId};

use crate::chain::ClassExtensionsChain;
use crate::module::ModuleConfiguration;

/// Everything one shop knows about its modules: the module configurations
/// (keyed by module id, unique per shop) and exactly one resolved class
/// extensions chain.
///
/// Mutated on every activate/deactivate; persisted as a whole so readers
/// never observe a half-updated shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfiguration {
    modules: BTreeMap<ModuleId, ModuleConfiguration>,
    class_extensions_chain: ClassExtensionsChain,
}

impl ShopConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a module configuration, keyed by its id.
    pub fn add_module_configuration(&mut self, module: ModuleConfiguration) {
        self.modules.insert(module.id().clone(), module);
    }

    pub fn remove_module_configuration(&mut self, module_id: &ModuleId) -> Option<ModuleConfiguration> {
        self.modules.remove(module_id)
    }

    pub fn has_module(&self, module_id: &ModuleId) -> bool {
        self.modules.contains_key(module_id)
    }

    pub fn module(&self, module_id: &ModuleId) -> ConfigResult<&ModuleConfiguration> {
        self.modules
            .get(module_id)
            .ok_or_else(|| ConfigError::not_found(format!("module '{module_id}' is not configured")))
    }

    pub fn module_mut(&mut self, module_id: &ModuleId) -> ConfigResult<&mut ModuleConfiguration> {
        self.modules
            .get_mut(module_id)
            .ok_or_else(|| ConfigError::not_found(format!("module '{module_id}' is not configured")))
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleConfiguration> {
        self.modules.values()
    }

    pub fn module_ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }

    /// Modules currently enabled for this shop.
    pub fn active_modules(&self) -> impl Iterator<Item = &ModuleConfiguration> {
        self.modules.values().filter(|m| m.is_auto_active())
    }

    pub fn chain(&self) -> &ClassExtensionsChain {
        &self.class_extensions_chain
    }

    pub fn chain_mut(&mut self) -> &mut ClassExtensionsChain {
        &mut self.class_extensions_chain
    }

    pub fn set_chain(&mut self, chain: ClassExtensionsChain) {
        self.class_extensions_chain = chain;
    }
}
