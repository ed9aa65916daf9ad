//! `shopforge-config` — the module configuration data model.
//!
//! Value objects describing what modules declare ([`ModuleSetting`],
//! [`ModuleConfiguration`]), the per-shop/per-environment/per-project
//! aggregation tree, the resolved [`ClassExtensionsChain`] and the derived
//! [`ShopConfigurationSetting`] records, plus the DAO traits forming the
//! persistence boundary.

pub mod chain;
pub mod dao;
pub mod module;
pub mod project;
pub mod setting;
pub mod shop;
pub mod shop_setting;

pub use chain::ClassExtensionsChain;
pub use dao::{
    ModuleConfigurationDao, ProjectConfigurationDao, ShopConfigurationDao,
    ShopConfigurationSettingDao,
};
pub use module::ModuleConfiguration;
pub use project::{EnvironmentConfiguration, ProjectConfiguration};
pub use setting::{
    ClassExtension, ModuleSetting, ModuleSettingKind, SettingValue, ShopModuleSetting,
    TemplateBlock,
};
pub use shop::ShopConfiguration;
pub use shop_setting::{ShopConfigurationSetting, ShopSettingName, ShopSettingValue};
