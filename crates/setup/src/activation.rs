//! Module activation/deactivation orchestration.
//!
//! The activation service drives the per-(module, shop) state machine
//! `{Inactive, Active}`. One activation is a single read-merge-write under
//! the shop's write lock:
//!
//! ```text
//! activate(module, shop)
//!   ↓
//! 1. Load the module configuration (NotFound when absent) and validate it
//!   ↓
//! 2. Take the shop's write lock
//!   ↓
//! 3. Load the shop configuration, flip the auto-active flag, merge the
//!    module's class extensions into the chain (set-like append, declaration
//!    order)
//!   ↓
//! 4. Recompute the derived settings and commit configuration + derived
//!    settings atomically
//!   ↓
//! 5. Publish the lifecycle event
//! ```
//!
//! Both transitions are no-op-safe: activating an active module or
//! deactivating an inactive one converges to the same state. Because the
//! commit in step 4 is all-or-nothing, no intermediate state is ever
//! observable and a persistence failure leaves the previous state fully
//! intact — callers simply retry the whole operation.

use shopforge_core::{ConfigError, ConfigResult, ModuleId, ShopId};
use shopforge_config::{
    ClassExtension, ModuleConfigurationDao, ShopConfiguration, ShopConfigurationDao,
};
use shopforge_events::{EventBus, ModuleSetupEvent};

use crate::adapter::ShopAdapter;
use crate::locks::ShopLocks;
use crate::settings::ModuleSettingsService;
use crate::state::ModuleStateService;

/// Orchestrates module activation and deactivation for a shop.
///
/// Collaborators are injected at construction; the service owns no storage
/// and keeps no state beyond its per-shop lock registry. `is_active` queries
/// are the job of [`ModuleStateService`] — the activation service only
/// drives transitions.
#[derive(Debug)]
pub struct ModuleActivationService<M, S, A, B> {
    module_configuration_dao: M,
    shop_configuration_dao: S,
    state_service: ModuleStateService<M>,
    settings_service: ModuleSettingsService<A>,
    bus: B,
    locks: ShopLocks,
}

impl<M, S, A, B> ModuleActivationService<M, S, A, B>
where
    M: ModuleConfigurationDao,
    S: ShopConfigurationDao,
    A: ShopAdapter,
    B: EventBus<ModuleSetupEvent>,
{
    pub fn new(
        module_configuration_dao: M,
        shop_configuration_dao: S,
        state_service: ModuleStateService<M>,
        settings_service: ModuleSettingsService<A>,
        bus: B,
    ) -> Self {
        Self {
            module_configuration_dao,
            shop_configuration_dao,
            state_service,
            settings_service,
            bus,
            locks: ShopLocks::new(),
        }
    }

    /// Activate `module_id` for `shop_id`.
    ///
    /// Fails with `NotFound` when the module is not configured for the shop
    /// and with `InvalidSetting` when its declared settings are malformed;
    /// in both cases nothing is persisted. Idempotent: a second activation
    /// yields the same chain and derived settings as the first.
    pub fn activate(&self, module_id: &ModuleId, shop_id: ShopId) -> ConfigResult<()> {
        let lock = self.locks.handle(shop_id);
        let _guard = lock
            .lock()
            .map_err(|_| ConfigError::persistence("shop write lock poisoned"))?;

        let module = self.module_configuration_dao.get(module_id, shop_id)?;
        module.validate()?;

        let mut configuration = self.shop_configuration_dao.get(shop_id)?;
        self.state_service
            .set_active(&mut configuration, module_id, true)?;
        configuration
            .chain_mut()
            .add_module_extensions(module.class_extensions());

        let derived = self
            .settings_service
            .derived_settings(shop_id, &configuration)?;
        self.shop_configuration_dao
            .commit(shop_id, configuration, derived)?;

        tracing::info!(module = %module_id, shop = %shop_id, "module activated");

        self.publish(ModuleSetupEvent::activated(shop_id, module_id.clone()))
    }

    /// Deactivate `module_id` for `shop_id`.
    ///
    /// Removes exactly the chain entries this module contributed; entries
    /// still claimed by another active module stay in place. Fails with
    /// `NotFound` when the module is not configured for the shop. No-op-safe
    /// on an inactive module.
    pub fn deactivate(&self, module_id: &ModuleId, shop_id: ShopId) -> ConfigResult<()> {
        let lock = self.locks.handle(shop_id);
        let _guard = lock
            .lock()
            .map_err(|_| ConfigError::persistence("shop write lock poisoned"))?;

        let module = self.module_configuration_dao.get(module_id, shop_id)?;

        let mut configuration = self.shop_configuration_dao.get(shop_id)?;
        self.state_service
            .set_active(&mut configuration, module_id, false)?;

        for extension in unclaimed_extensions(&configuration, module_id, module.class_extensions()) {
            configuration
                .chain_mut()
                .remove(&extension.original, &extension.extension);
        }

        let derived = self
            .settings_service
            .derived_settings(shop_id, &configuration)?;
        self.shop_configuration_dao
            .commit(shop_id, configuration, derived)?;

        tracing::info!(module = %module_id, shop = %shop_id, "module deactivated");

        self.publish(ModuleSetupEvent::deactivated(shop_id, module_id.clone()))
    }

    fn publish(&self, event: ModuleSetupEvent) -> ConfigResult<()> {
        // The commit already happened; a publish failure is surfaced so the
        // caller can retry the (idempotent) operation.
        self.bus
            .publish(event)
            .map_err(|e| ConfigError::persistence(format!("event publication failed: {e:?}")))
    }
}

/// The subset of `extensions` no other active module still declares.
///
/// Two active modules may declare the same `(original, extension)` pair;
/// deactivating one of them must keep the shared chain entry alive for the
/// other.
fn unclaimed_extensions(
    configuration: &ShopConfiguration,
    module_id: &ModuleId,
    extensions: &[ClassExtension],
) -> Vec<ClassExtension> {
    let claimed: Vec<&ClassExtension> = configuration
        .active_modules()
        .filter(|m| m.id() != module_id)
        .flat_map(|m| m.class_extensions())
        .collect();

    extensions
        .iter()
        .filter(|ext| {
            !claimed
                .iter()
                .any(|c| c.original == ext.original && c.extension == ext.extension)
        })
        .cloned()
        .collect()
}
