//! Module activation state.

use shopforge_core::{ConfigResult, ModuleId, ShopId};
use shopforge_config::{ModuleConfigurationDao, ShopConfiguration};

/// Queries and sets whether a module is active for a shop.
///
/// State is tracked by the module's auto-active flag alone — it is never
/// re-derived from chain contents, so a module with no class extensions is
/// just as "active" as one extending half the shop.
#[derive(Debug)]
pub struct ModuleStateService<M> {
    module_configuration_dao: M,
}

impl<M> ModuleStateService<M>
where
    M: ModuleConfigurationDao,
{
    pub fn new(module_configuration_dao: M) -> Self {
        Self {
            module_configuration_dao,
        }
    }

    /// Fails with `NotFound` when the module is not configured for the shop.
    pub fn is_active(&self, module_id: &ModuleId, shop_id: ShopId) -> ConfigResult<bool> {
        Ok(self
            .module_configuration_dao
            .get(module_id, shop_id)?
            .is_auto_active())
    }

    /// Flip the flag inside a configuration snapshot being prepared for
    /// commit. The caller owns the commit boundary.
    pub fn set_active(
        &self,
        configuration: &mut ShopConfiguration,
        module_id: &ModuleId,
        active: bool,
    ) -> ConfigResult<()> {
        configuration.module_mut(module_id)?.set_auto_active(active);
        Ok(())
    }
}
