//! Derived per-shop settings.
//!
//! Flat `(name, shop id, value)` records, persisted separately from module
//! configuration. They are **derived state**: fast-path lookups recomputed
//! from the authoritative shop configuration on every activation commit. The
//! derived chain value must equal the chain stored in the shop configuration
//! at all times.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopforge_core::{ModuleId, ShopId, ValueObject};

use crate::setting::ShopModuleSetting;

/// Name of a derived shop setting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopSettingName {
    /// The resolved class extensions chain (original → ordered extensions).
    ModuleClassExtensionsChain,
    /// Controller keys registered by active modules.
    ModuleControllers,
    /// Template overrides registered by active modules.
    ModuleTemplates,
    /// Absolute Smarty plugin directories of active modules.
    ModuleSmartyPluginDirectories,
    /// Shop-visible setting values of active modules.
    ModuleSettingValues,
}

impl ShopSettingName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ModuleClassExtensionsChain => "module_class_extensions_chain",
            Self::ModuleControllers => "module_controllers",
            Self::ModuleTemplates => "module_templates",
            Self::ModuleSmartyPluginDirectories => "module_smarty_plugin_directories",
            Self::ModuleSettingValues => "module_setting_values",
        }
    }
}

impl core::fmt::Display for ShopSettingName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed payload of a derived shop setting, one shape per name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopSettingValue {
    ExtensionsChain(BTreeMap<String, Vec<String>>),
    ControllerMap(BTreeMap<ModuleId, BTreeMap<String, String>>),
    TemplateMap(BTreeMap<ModuleId, BTreeMap<String, String>>),
    PluginDirectories(BTreeMap<ModuleId, Vec<String>>),
    SettingValues(BTreeMap<ModuleId, Vec<ShopModuleSetting>>),
}

impl ShopSettingValue {
    /// Which derived setting this payload belongs to. Deriving the name from
    /// the value makes mismatched (name, value) pairs unrepresentable.
    pub fn name(&self) -> ShopSettingName {
        match self {
            Self::ExtensionsChain(_) => ShopSettingName::ModuleClassExtensionsChain,
            Self::ControllerMap(_) => ShopSettingName::ModuleControllers,
            Self::TemplateMap(_) => ShopSettingName::ModuleTemplates,
            Self::PluginDirectories(_) => ShopSettingName::ModuleSmartyPluginDirectories,
            Self::SettingValues(_) => ShopSettingName::ModuleSettingValues,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::ExtensionsChain(map) => map.is_empty(),
            Self::ControllerMap(map) => map.is_empty(),
            Self::TemplateMap(map) => map.is_empty(),
            Self::PluginDirectories(map) => map.is_empty(),
            Self::SettingValues(map) => map.is_empty(),
        }
    }
}

/// One derived setting record scoped to a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfigurationSetting {
    shop_id: ShopId,
    value: ShopSettingValue,
}

impl ValueObject for ShopConfigurationSetting {}

impl ShopConfigurationSetting {
    pub fn new(shop_id: ShopId, value: ShopSettingValue) -> Self {
        Self { shop_id, value }
    }

    pub fn shop_id(&self) -> ShopId {
        self.shop_id
    }

    pub fn name(&self) -> ShopSettingName {
        self.value.name()
    }

    pub fn value(&self) -> &ShopSettingValue {
        &self.value
    }

    pub fn into_value(self) -> ShopSettingValue {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_derived_from_the_payload() {
        let setting = ShopConfigurationSetting::new(
            ShopId::new(1),
            ShopSettingValue::ExtensionsChain(BTreeMap::new()),
        );

        assert_eq!(setting.name(), ShopSettingName::ModuleClassExtensionsChain);
        assert!(setting.value().is_empty());
    }

    #[test]
    fn setting_round_trips_through_serde() {
        let value = ShopSettingValue::ControllerMap(BTreeMap::from([(
            ModuleId::new("m1").unwrap(),
            BTreeMap::from([("key".to_string(), "ns::Controller".to_string())]),
        )]));
        let setting = ShopConfigurationSetting::new(ShopId::new(2), value);

        let json = serde_json::to_string(&setting).unwrap();
        let restored: ShopConfigurationSetting = serde_json::from_str(&json).unwrap();
        assert_eq!(setting, restored);
    }
}
