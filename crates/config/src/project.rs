//! Environment and project configuration containers.
//!
//! Pure containers: an environment maps shop id → shop configuration, a
//! project maps environment name → environment configuration. The project is
//! the root persisted unit and exclusively owns the tree beneath it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopforge_core::{ConfigError, ConfigResult, EnvironmentId, ShopId};

use crate::shop::ShopConfiguration;

/// All shop configurations of one deployment environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfiguration {
    shops: BTreeMap<ShopId, ShopConfiguration>,
}

impl EnvironmentConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shop_configuration(&mut self, shop_id: ShopId, configuration: ShopConfiguration) {
        self.shops.insert(shop_id, configuration);
    }

    pub fn shop(&self, shop_id: ShopId) -> ConfigResult<&ShopConfiguration> {
        self.shops
            .get(&shop_id)
            .ok_or_else(|| ConfigError::not_found(format!("shop {shop_id} is not configured")))
    }

    pub fn shop_mut(&mut self, shop_id: ShopId) -> ConfigResult<&mut ShopConfiguration> {
        self.shops
            .get_mut(&shop_id)
            .ok_or_else(|| ConfigError::not_found(format!("shop {shop_id} is not configured")))
    }

    pub fn has_shop(&self, shop_id: ShopId) -> bool {
        self.shops.contains_key(&shop_id)
    }

    pub fn shop_ids(&self) -> impl Iterator<Item = ShopId> + '_ {
        self.shops.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

/// Root persisted unit: environment name → environment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfiguration {
    environments: BTreeMap<EnvironmentId, EnvironmentConfiguration>,
}

impl ProjectConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_environment_configuration(
        &mut self,
        environment: EnvironmentId,
        configuration: EnvironmentConfiguration,
    ) {
        self.environments.insert(environment, configuration);
    }

    pub fn environment(&self, environment: &EnvironmentId) -> ConfigResult<&EnvironmentConfiguration> {
        self.environments.get(environment).ok_or_else(|| {
            ConfigError::not_found(format!("environment '{environment}' is not configured"))
        })
    }

    pub fn environment_mut(
        &mut self,
        environment: &EnvironmentId,
    ) -> ConfigResult<&mut EnvironmentConfiguration> {
        self.environments.get_mut(environment).ok_or_else(|| {
            ConfigError::not_found(format!("environment '{environment}' is not configured"))
        })
    }

    pub fn environments(&self) -> impl Iterator<Item = (&EnvironmentId, &EnvironmentConfiguration)> {
        self.environments.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_keys_are_unique() {
        let mut project = ProjectConfiguration::new();
        project.add_environment_configuration(
            EnvironmentId::new("prod").unwrap(),
            EnvironmentConfiguration::new(),
        );
        project.add_environment_configuration(
            EnvironmentId::new("prod").unwrap(),
            EnvironmentConfiguration::new(),
        );

        assert_eq!(project.environments().count(), 1);
    }

    #[test]
    fn missing_environment_and_shop_surface_not_found() {
        let project = ProjectConfiguration::new();
        let prod = EnvironmentId::new("prod").unwrap();
        assert!(matches!(project.environment(&prod), Err(ConfigError::NotFound(_))));

        let environment = EnvironmentConfiguration::new();
        assert!(matches!(environment.shop(ShopId::new(1)), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn tree_round_trips_through_serde() {
        let mut environment = EnvironmentConfiguration::new();
        environment.add_shop_configuration(ShopId::new(1), ShopConfiguration::new());

        let mut project = ProjectConfiguration::new();
        project.add_environment_configuration(EnvironmentId::new("prod").unwrap(), environment);

        let json = serde_json::to_string(&project).unwrap();
        let restored: ProjectConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(project, restored);
    }
}
