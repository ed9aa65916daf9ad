//! Declared module settings as a tagged union.
//!
//! A module's metadata declares what the module plugs into the shop:
//! controllers, templates, class extensions, template blocks, Smarty plugin
//! directories and shop-visible setting values. Each setting kind carries its
//! own strongly-typed payload and is resolved via exhaustive matching —
//! there is no runtime type inspection anywhere in the subsystem.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use shopforge_core::{ConfigError, ConfigResult, ValueObject};

/// Discriminant of a [`ModuleSetting`] variant.
///
/// Setting kinds are unique within a module configuration; adding a setting
/// of an existing kind replaces the previous one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleSettingKind {
    Controllers,
    Templates,
    SmartyPluginDirectories,
    TemplateBlocks,
    ClassExtensions,
    ClassesWithoutNamespace,
    ShopModuleSettings,
}

impl ModuleSettingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Controllers => "controllers",
            Self::Templates => "templates",
            Self::SmartyPluginDirectories => "smarty_plugin_directories",
            Self::TemplateBlocks => "template_blocks",
            Self::ClassExtensions => "class_extensions",
            Self::ClassesWithoutNamespace => "classes_without_namespace",
            Self::ShopModuleSettings => "shop_module_settings",
        }
    }
}

/// Typed value of a single shop-visible module setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Select(String),
    Arr(Vec<String>),
    AssocArr(BTreeMap<String, String>),
}

/// A shop-visible, admin-editable setting declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopModuleSetting {
    pub group: String,
    pub name: String,
    pub value: SettingValue,
}

/// A template block override: the module injects `file` into `block` of
/// `template`, ordered by `position` among competing overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBlock {
    pub block: String,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub template: String,
    pub file: String,
}

/// One declared class override: `extension` wraps `original`.
///
/// Declaration order within a module is significant — it is the order the
/// entries are appended to the shop's class extensions chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassExtension {
    pub original: String,
    pub extension: String,
}

impl ClassExtension {
    pub fn new(original: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            extension: extension.into(),
        }
    }
}

/// One declared module setting (sum type, one variant per setting kind).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleSetting {
    /// Controller key → controller class namespace.
    Controllers(BTreeMap<String, String>),
    /// Original template path → module template path.
    Templates(BTreeMap<String, String>),
    /// Smarty plugin directories, relative to the module directory,
    /// declaration order preserved.
    SmartyPluginDirectories(Vec<String>),
    /// Template block overrides.
    TemplateBlocks(Vec<TemplateBlock>),
    /// Class overrides, in declaration order.
    ClassExtensions(Vec<ClassExtension>),
    /// Legacy class name → file path (classes outside any namespace).
    ClassesWithoutNamespace(BTreeMap<String, String>),
    /// Shop-visible setting values.
    ShopModuleSettings(Vec<ShopModuleSetting>),
}

impl ValueObject for ModuleSetting {}

impl ModuleSetting {
    pub fn kind(&self) -> ModuleSettingKind {
        match self {
            Self::Controllers(_) => ModuleSettingKind::Controllers,
            Self::Templates(_) => ModuleSettingKind::Templates,
            Self::SmartyPluginDirectories(_) => ModuleSettingKind::SmartyPluginDirectories,
            Self::TemplateBlocks(_) => ModuleSettingKind::TemplateBlocks,
            Self::ClassExtensions(_) => ModuleSettingKind::ClassExtensions,
            Self::ClassesWithoutNamespace(_) => ModuleSettingKind::ClassesWithoutNamespace,
            Self::ShopModuleSettings(_) => ModuleSettingKind::ShopModuleSettings,
        }
    }

    /// Validate the setting shape. Malformed settings are rejected here, at
    /// configuration build time, before anything reaches persistence.
    pub fn validate(&self) -> ConfigResult<()> {
        match self {
            Self::Controllers(map) => validate_map_entries("controllers", map),
            Self::Templates(map) => validate_map_entries("templates", map),
            Self::ClassesWithoutNamespace(map) => {
                validate_map_entries("classes_without_namespace", map)
            }
            Self::SmartyPluginDirectories(dirs) => {
                for dir in dirs {
                    if dir.trim().is_empty() {
                        return Err(ConfigError::invalid_setting(
                            "smarty_plugin_directories contains an empty directory entry",
                        ));
                    }
                }
                Ok(())
            }
            Self::TemplateBlocks(blocks) => {
                for block in blocks {
                    if block.block.trim().is_empty()
                        || block.template.trim().is_empty()
                        || block.file.trim().is_empty()
                    {
                        return Err(ConfigError::invalid_setting(format!(
                            "template block '{}' must declare block, template and file",
                            block.block
                        )));
                    }
                }
                Ok(())
            }
            Self::ClassExtensions(extensions) => {
                let mut originals = BTreeSet::new();
                for ext in extensions {
                    if ext.original.trim().is_empty() || ext.extension.trim().is_empty() {
                        return Err(ConfigError::invalid_setting(
                            "class_extensions contains an empty class namespace",
                        ));
                    }
                    if !originals.insert(ext.original.as_str()) {
                        return Err(ConfigError::invalid_setting(format!(
                            "class_extensions declares '{}' more than once",
                            ext.original
                        )));
                    }
                }
                Ok(())
            }
            Self::ShopModuleSettings(settings) => {
                let mut names = BTreeSet::new();
                for setting in settings {
                    if setting.name.trim().is_empty() {
                        return Err(ConfigError::invalid_setting(
                            "shop_module_settings contains a setting without a name",
                        ));
                    }
                    if !names.insert((setting.group.as_str(), setting.name.as_str())) {
                        return Err(ConfigError::invalid_setting(format!(
                            "shop_module_settings declares '{}/{}' more than once",
                            setting.group, setting.name
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

fn validate_map_entries(kind: &str, map: &BTreeMap<String, String>) -> ConfigResult<()> {
    for (key, value) in map {
        if key.trim().is_empty() || value.trim().is_empty() {
            return Err(ConfigError::invalid_setting(format!(
                "{kind} contains an empty key or value"
            )));
        }
    }
    Ok(())
}
