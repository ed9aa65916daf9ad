//! Module configuration: what one module declares, plus its activation flag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopforge_core::{ConfigResult, Entity, ModuleId};

use crate::setting::{
    ClassExtension, ModuleSetting, ModuleSettingKind, ShopModuleSetting, TemplateBlock,
};

/// Declared configuration of one module.
///
/// Settings are kind-unique and kept in insertion order; adding a setting of
/// an existing kind replaces it. The `auto_active` flag is the authoritative
/// "is this module enabled" bit for the owning shop — activation state is
/// never re-derived from chain contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    id: ModuleId,
    path: String,
    settings: Vec<ModuleSetting>,
    auto_active: bool,
}

impl ModuleConfiguration {
    pub fn new(id: ModuleId, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            settings: Vec::new(),
            auto_active: false,
        }
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_auto_active(&self) -> bool {
        self.auto_active
    }

    pub fn set_auto_active(&mut self, active: bool) {
        self.auto_active = active;
    }

    /// Add a setting, validating its shape first. Replaces any previously
    /// declared setting of the same kind.
    pub fn add_setting(&mut self, setting: ModuleSetting) -> ConfigResult<()> {
        setting.validate()?;
        self.settings.retain(|s| s.kind() != setting.kind());
        self.settings.push(setting);
        Ok(())
    }

    /// Builder-style [`add_setting`](Self::add_setting) for fixture code.
    pub fn with_setting(mut self, setting: ModuleSetting) -> ConfigResult<Self> {
        self.add_setting(setting)?;
        Ok(self)
    }

    pub fn settings(&self) -> &[ModuleSetting] {
        &self.settings
    }

    pub fn setting(&self, kind: ModuleSettingKind) -> Option<&ModuleSetting> {
        self.settings.iter().find(|s| s.kind() == kind)
    }

    /// Declared class overrides, in declaration order. Empty when the module
    /// extends nothing.
    pub fn class_extensions(&self) -> &[ClassExtension] {
        for setting in &self.settings {
            if let ModuleSetting::ClassExtensions(extensions) = setting {
                return extensions;
            }
        }
        &[]
    }

    pub fn controllers(&self) -> Option<&BTreeMap<String, String>> {
        match self.setting(ModuleSettingKind::Controllers) {
            Some(ModuleSetting::Controllers(map)) => Some(map),
            _ => None,
        }
    }

    pub fn templates(&self) -> Option<&BTreeMap<String, String>> {
        match self.setting(ModuleSettingKind::Templates) {
            Some(ModuleSetting::Templates(map)) => Some(map),
            _ => None,
        }
    }

    pub fn smarty_plugin_directories(&self) -> &[String] {
        match self.setting(ModuleSettingKind::SmartyPluginDirectories) {
            Some(ModuleSetting::SmartyPluginDirectories(dirs)) => dirs,
            _ => &[],
        }
    }

    pub fn template_blocks(&self) -> &[TemplateBlock] {
        match self.setting(ModuleSettingKind::TemplateBlocks) {
            Some(ModuleSetting::TemplateBlocks(blocks)) => blocks,
            _ => &[],
        }
    }

    pub fn shop_module_settings(&self) -> &[ShopModuleSetting] {
        match self.setting(ModuleSettingKind::ShopModuleSettings) {
            Some(ModuleSetting::ShopModuleSettings(settings)) => settings,
            _ => &[],
        }
    }

    /// Re-validate every declared setting.
    pub fn validate(&self) -> ConfigResult<()> {
        for setting in &self.settings {
            setting.validate()?;
        }
        Ok(())
    }
}

impl Entity for ModuleConfiguration {
    type Id = ModuleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
