//! Persistence boundary of the configuration subsystem.
//!
//! The traits make no storage assumptions; implementations live in
//! `shopforge-infra`. All reads return owned values (snapshots), all writes
//! go through defined root aggregates — never partial mutation. A shop
//! commit replaces the shop configuration **and** its derived settings in
//! one atomic step, so readers cannot observe a torn state between the
//! authoritative chain and its derived fast-path copy.

use std::sync::Arc;

use shopforge_core::{ConfigResult, ModuleId, ShopId};

use crate::module::ModuleConfiguration;
use crate::project::ProjectConfiguration;
use crate::shop::ShopConfiguration;
use crate::shop_setting::{ShopConfigurationSetting, ShopSettingName};

/// Read access to a single module's configuration within the active
/// environment.
pub trait ModuleConfigurationDao: Send + Sync {
    /// Fails with `NotFound` when no configuration exists for
    /// `(module_id, shop_id)`.
    fn get(&self, module_id: &ModuleId, shop_id: ShopId) -> ConfigResult<ModuleConfiguration>;
}

/// Read/commit access to one shop's configuration within the active
/// environment.
pub trait ShopConfigurationDao: Send + Sync {
    /// Fails with `NotFound` when the shop is unknown.
    fn get(&self, shop_id: ShopId) -> ConfigResult<ShopConfiguration>;

    /// Replace the shop configuration and the full set of its derived
    /// settings in one commit. All-or-nothing: on failure the previous state
    /// stays fully intact.
    fn commit(
        &self,
        shop_id: ShopId,
        configuration: ShopConfiguration,
        derived: Vec<ShopConfigurationSetting>,
    ) -> ConfigResult<()>;
}

/// Persistence of the root configuration tree.
pub trait ProjectConfigurationDao: Send + Sync {
    fn get_configuration(&self) -> ConfigResult<ProjectConfiguration>;

    /// Full-tree upsert: replaces any previous configuration for every
    /// (environment, shop) pair present in the payload. Never silently
    /// merges with stale unrelated shops.
    fn persist_configuration(&self, configuration: &ProjectConfiguration) -> ConfigResult<()>;
}

/// Read access to derived per-shop settings (fast-path lookups).
pub trait ShopConfigurationSettingDao: Send + Sync {
    /// Fails with `NotFound` when the setting was never registered for the
    /// shop.
    fn get(&self, name: ShopSettingName, shop_id: ShopId) -> ConfigResult<ShopConfigurationSetting>;
}

impl<D> ModuleConfigurationDao for Arc<D>
where
    D: ModuleConfigurationDao + ?Sized,
{
    fn get(&self, module_id: &ModuleId, shop_id: ShopId) -> ConfigResult<ModuleConfiguration> {
        (**self).get(module_id, shop_id)
    }
}

impl<D> ShopConfigurationDao for Arc<D>
where
    D: ShopConfigurationDao + ?Sized,
{
    fn get(&self, shop_id: ShopId) -> ConfigResult<ShopConfiguration> {
        (**self).get(shop_id)
    }

    fn commit(
        &self,
        shop_id: ShopId,
        configuration: ShopConfiguration,
        derived: Vec<ShopConfigurationSetting>,
    ) -> ConfigResult<()> {
        (**self).commit(shop_id, configuration, derived)
    }
}

impl<D> ProjectConfigurationDao for Arc<D>
where
    D: ProjectConfigurationDao + ?Sized,
{
    fn get_configuration(&self) -> ConfigResult<ProjectConfiguration> {
        (**self).get_configuration()
    }

    fn persist_configuration(&self, configuration: &ProjectConfiguration) -> ConfigResult<()> {
        (**self).persist_configuration(configuration)
    }
}

impl<D> ShopConfigurationSettingDao for Arc<D>
where
    D: ShopConfigurationSettingDao + ?Sized,
{
    fn get(&self, name: ShopSettingName, shop_id: ShopId) -> ConfigResult<ShopConfigurationSetting> {
        (**self).get(name, shop_id)
    }
}
