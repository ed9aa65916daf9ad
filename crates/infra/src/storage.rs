//! In-memory configuration storage.
//!
//! One `RwLock`-guarded state backs every DAO view, so a shop commit
//! (configuration + derived settings) is all-or-nothing for readers. The
//! storage is scoped to one active environment: DAO reads resolve against
//! that environment's slice of the project tree.
//!
//! Intended for tests/dev and as the reference semantics for persistent
//! backends. Not optimized for performance.

use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use shopforge_core::{ConfigError, ConfigResult, EnvironmentId, ModuleId, ShopId};
use shopforge_config::{
    ModuleConfiguration, ModuleConfigurationDao, ProjectConfiguration, ProjectConfigurationDao,
    ShopConfiguration, ShopConfigurationDao, ShopConfigurationSetting, ShopConfigurationSettingDao,
    ShopSettingName,
};

#[derive(Debug, Default)]
struct StorageState {
    project: ProjectConfiguration,
    settings: HashMap<(ShopId, ShopSettingName), ShopConfigurationSetting>,
}

/// Shared in-memory backend for all configuration DAOs.
#[derive(Debug)]
pub struct InMemoryConfigurationStorage {
    environment: EnvironmentId,
    state: RwLock<StorageState>,
}

impl InMemoryConfigurationStorage {
    pub fn new(environment: EnvironmentId) -> Self {
        Self {
            environment,
            state: RwLock::new(StorageState::default()),
        }
    }

    pub fn environment(&self) -> &EnvironmentId {
        &self.environment
    }

    fn read(&self) -> ConfigResult<RwLockReadGuard<'_, StorageState>> {
        self.state
            .read()
            .map_err(|_| ConfigError::persistence("configuration storage lock poisoned"))
    }

    fn write(&self) -> ConfigResult<RwLockWriteGuard<'_, StorageState>> {
        self.state
            .write()
            .map_err(|_| ConfigError::persistence("configuration storage lock poisoned"))
    }
}

impl ProjectConfigurationDao for InMemoryConfigurationStorage {
    fn get_configuration(&self) -> ConfigResult<ProjectConfiguration> {
        Ok(self.read()?.project.clone())
    }

    fn persist_configuration(&self, configuration: &ProjectConfiguration) -> ConfigResult<()> {
        // Full-tree replace. Derived settings of shops that vanished from
        // the active environment are dropped with their shops.
        let known_shops: BTreeSet<ShopId> = configuration
            .environment(&self.environment)
            .map(|environment| environment.shop_ids().collect())
            .unwrap_or_default();

        let mut state = self.write()?;
        state.project = configuration.clone();
        state
            .settings
            .retain(|(shop_id, _), _| known_shops.contains(shop_id));
        Ok(())
    }
}

impl ModuleConfigurationDao for InMemoryConfigurationStorage {
    fn get(&self, module_id: &ModuleId, shop_id: ShopId) -> ConfigResult<ModuleConfiguration> {
        let state = self.read()?;
        state
            .project
            .environment(&self.environment)?
            .shop(shop_id)?
            .module(module_id)
            .map(Clone::clone)
            .map_err(|_| {
                ConfigError::not_found(format!(
                    "module '{module_id}' is not configured for shop {shop_id}"
                ))
            })
    }
}

impl ShopConfigurationDao for InMemoryConfigurationStorage {
    fn get(&self, shop_id: ShopId) -> ConfigResult<ShopConfiguration> {
        let state = self.read()?;
        state
            .project
            .environment(&self.environment)?
            .shop(shop_id)
            .map(Clone::clone)
    }

    fn commit(
        &self,
        shop_id: ShopId,
        configuration: ShopConfiguration,
        derived: Vec<ShopConfigurationSetting>,
    ) -> ConfigResult<()> {
        // Reject a torn commit before touching any state.
        for setting in &derived {
            if setting.shop_id() != shop_id {
                return Err(ConfigError::validation(format!(
                    "derived setting '{}' targets shop {} in a commit for shop {shop_id}",
                    setting.name(),
                    setting.shop_id()
                )));
            }
        }

        let mut state = self.write()?;
        state
            .project
            .environment_mut(&self.environment)?
            .add_shop_configuration(shop_id, configuration);
        state.settings.retain(|(s, _), _| *s != shop_id);
        for setting in derived {
            state.settings.insert((shop_id, setting.name()), setting);
        }
        Ok(())
    }
}

impl ShopConfigurationSettingDao for InMemoryConfigurationStorage {
    fn get(&self, name: ShopSettingName, shop_id: ShopId) -> ConfigResult<ShopConfigurationSetting> {
        self.read()?
            .settings
            .get(&(shop_id, name))
            .cloned()
            .ok_or_else(|| {
                ConfigError::not_found(format!(
                    "shop setting '{name}' was never registered for shop {shop_id}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use shopforge_config::{EnvironmentConfiguration, ShopSettingValue};

    use super::*;

    fn prod() -> EnvironmentId {
        EnvironmentId::new("prod").unwrap()
    }

    fn project_with_shops(shop_ids: &[u32]) -> ProjectConfiguration {
        let mut environment = EnvironmentConfiguration::new();
        for id in shop_ids {
            environment.add_shop_configuration(ShopId::new(*id), ShopConfiguration::new());
        }
        let mut project = ProjectConfiguration::new();
        project.add_environment_configuration(prod(), environment);
        project
    }

    #[test]
    fn persisting_replaces_the_whole_tree() {
        let storage = InMemoryConfigurationStorage::new(prod());
        storage.persist_configuration(&project_with_shops(&[1, 2])).unwrap();
        storage.persist_configuration(&project_with_shops(&[1])).unwrap();

        let project = storage.get_configuration().unwrap();
        assert!(project.environment(&prod()).unwrap().has_shop(ShopId::new(1)));
        assert!(!project.environment(&prod()).unwrap().has_shop(ShopId::new(2)));
    }

    #[test]
    fn replacing_the_tree_drops_settings_of_vanished_shops() {
        let storage = InMemoryConfigurationStorage::new(prod());
        storage.persist_configuration(&project_with_shops(&[1, 2])).unwrap();

        let setting = ShopConfigurationSetting::new(
            ShopId::new(2),
            ShopSettingValue::ExtensionsChain(Default::default()),
        );
        ShopConfigurationDao::commit(&storage, ShopId::new(2), ShopConfiguration::new(), vec![setting])
            .unwrap();

        storage.persist_configuration(&project_with_shops(&[1])).unwrap();

        let result = ShopConfigurationSettingDao::get(
            &storage,
            ShopSettingName::ModuleClassExtensionsChain,
            ShopId::new(2),
        );
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn commit_rejects_settings_for_another_shop() {
        let storage = InMemoryConfigurationStorage::new(prod());
        storage.persist_configuration(&project_with_shops(&[1])).unwrap();

        let foreign = ShopConfigurationSetting::new(
            ShopId::new(9),
            ShopSettingValue::ExtensionsChain(Default::default()),
        );
        let result = ShopConfigurationDao::commit(
            &storage,
            ShopId::new(1),
            ShopConfiguration::new(),
            vec![foreign],
        );

        assert!(matches!(result, Err(ConfigError::Validation(_))));
        // Nothing was registered by the failed commit.
        let lookup = ShopConfigurationSettingDao::get(
            &storage,
            ShopSettingName::ModuleClassExtensionsChain,
            ShopId::new(1),
        );
        assert!(matches!(lookup, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn reads_against_an_unknown_shop_or_module_surface_not_found() {
        let storage = InMemoryConfigurationStorage::new(prod());
        storage.persist_configuration(&project_with_shops(&[1])).unwrap();

        let module_id = ModuleId::new("missing").unwrap();
        assert!(matches!(
            ModuleConfigurationDao::get(&storage, &module_id, ShopId::new(1)),
            Err(ConfigError::NotFound(_))
        ));
        assert!(matches!(
            ShopConfigurationDao::get(&storage, ShopId::new(7)),
            Err(ConfigError::NotFound(_))
        ));
    }
}
