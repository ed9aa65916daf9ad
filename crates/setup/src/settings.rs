//! Derived-settings registration.
//!
//! Whenever a shop's module state changes, the full set of derived
//! [`ShopConfigurationSetting`] records is recomputed from the authoritative
//! shop configuration — no incremental patching, so the derived view can
//! never drift from the source of truth. Dependent services resolve
//! module-provided controllers, templates and setting values from these
//! records without walking the configuration tree.

use std::collections::BTreeMap;

use shopforge_core::{ConfigError, ConfigResult, ModuleId, ShopId};
use shopforge_config::{
    ModuleSetting, ShopConfiguration, ShopConfigurationSetting, ShopModuleSetting,
    ShopSettingValue,
};

use crate::adapter::ShopAdapter;

/// Computes the derived settings of a shop from its active modules.
#[derive(Debug)]
pub struct ModuleSettingsService<A> {
    shop_adapter: A,
}

impl<A> ModuleSettingsService<A>
where
    A: ShopAdapter,
{
    pub fn new(shop_adapter: A) -> Self {
        Self { shop_adapter }
    }

    /// Recompute every derived setting for `shop_id`.
    ///
    /// All five records are always emitted, empty or not — "nothing
    /// registered" is an empty map, so readers of a freshly emptied chain see
    /// an empty value rather than a stale one.
    pub fn derived_settings(
        &self,
        shop_id: ShopId,
        configuration: &ShopConfiguration,
    ) -> ConfigResult<Vec<ShopConfigurationSetting>> {
        let mut controllers: BTreeMap<ModuleId, BTreeMap<String, String>> = BTreeMap::new();
        let mut templates: BTreeMap<ModuleId, BTreeMap<String, String>> = BTreeMap::new();
        let mut plugin_directories: BTreeMap<ModuleId, Vec<String>> = BTreeMap::new();
        let mut setting_values: BTreeMap<ModuleId, Vec<ShopModuleSetting>> = BTreeMap::new();
        let mut claimed_controller_keys: BTreeMap<&str, &ModuleId> = BTreeMap::new();

        for module in configuration.active_modules() {
            for setting in module.settings() {
                match setting {
                    ModuleSetting::Controllers(map) => {
                        for key in map.keys() {
                            if let Some(owner) = claimed_controller_keys.insert(key.as_str(), module.id()) {
                                return Err(ConfigError::validation(format!(
                                    "controller key '{key}' is claimed by both '{owner}' and '{}'",
                                    module.id()
                                )));
                            }
                        }
                        controllers.insert(module.id().clone(), map.clone());
                    }
                    ModuleSetting::Templates(map) => {
                        templates.insert(module.id().clone(), map.clone());
                    }
                    ModuleSetting::SmartyPluginDirectories(dirs) => {
                        let root = self.shop_adapter.module_full_path(module)?;
                        let resolved = dirs
                            .iter()
                            .map(|dir| root.join(dir).display().to_string())
                            .collect();
                        plugin_directories.insert(module.id().clone(), resolved);
                    }
                    ModuleSetting::ShopModuleSettings(values) => {
                        setting_values.insert(module.id().clone(), values.clone());
                    }
                    // Merged into the chain by the activation service.
                    ModuleSetting::ClassExtensions(_) => {}
                    // Consumed by the template engine directly from the
                    // module configuration; nothing to register per shop.
                    ModuleSetting::TemplateBlocks(_) => {}
                    // Legacy autoloading data; resolved from the module
                    // configuration on demand.
                    ModuleSetting::ClassesWithoutNamespace(_) => {}
                }
            }
        }

        Ok(vec![
            ShopConfigurationSetting::new(
                shop_id,
                ShopSettingValue::ExtensionsChain(configuration.chain().as_map().clone()),
            ),
            ShopConfigurationSetting::new(shop_id, ShopSettingValue::ControllerMap(controllers)),
            ShopConfigurationSetting::new(shop_id, ShopSettingValue::TemplateMap(templates)),
            ShopConfigurationSetting::new(
                shop_id,
                ShopSettingValue::PluginDirectories(plugin_directories),
            ),
            ShopConfigurationSetting::new(shop_id, ShopSettingValue::SettingValues(setting_values)),
        ])
    }
}
