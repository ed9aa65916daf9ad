//! Shop adapter: resolving module resources on disk.
//!
//! The adapter is an external collaborator of the setup services — it knows
//! where the shop keeps its modules, nothing about activation state. Behind a
//! trait so tests can inject a stub instead of touching the filesystem
//! layout.

use std::path::PathBuf;
use std::sync::Arc;

use shopforge_core::{ConfigError, ConfigResult};
use shopforge_config::ModuleConfiguration;

/// Resolves a module's on-disk location.
pub trait ShopAdapter: Send + Sync {
    /// Absolute directory of the module, resolved from its declared
    /// relative path.
    fn module_full_path(&self, module: &ModuleConfiguration) -> ConfigResult<PathBuf>;
}

impl<A> ShopAdapter for Arc<A>
where
    A: ShopAdapter + ?Sized,
{
    fn module_full_path(&self, module: &ModuleConfiguration) -> ConfigResult<PathBuf> {
        (**self).module_full_path(module)
    }
}

/// Production adapter: modules live beneath a fixed modules root.
#[derive(Debug, Clone)]
pub struct FilesystemShopAdapter {
    modules_root: PathBuf,
}

impl FilesystemShopAdapter {
    pub fn new(modules_root: impl Into<PathBuf>) -> Self {
        Self {
            modules_root: modules_root.into(),
        }
    }
}

impl ShopAdapter for FilesystemShopAdapter {
    fn module_full_path(&self, module: &ModuleConfiguration) -> ConfigResult<PathBuf> {
        if module.path().trim().is_empty() {
            return Err(ConfigError::validation(format!(
                "module '{}' declares no path",
                module.id()
            )));
        }
        Ok(self.modules_root.join(module.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopforge_core::ModuleId;

    #[test]
    fn resolves_beneath_the_modules_root() {
        let adapter = FilesystemShopAdapter::new("/var/www/shop/modules");
        let module = ModuleConfiguration::new(ModuleId::new("testModuleId").unwrap(), "TestModule");

        let path = adapter.module_full_path(&module).unwrap();
        assert_eq!(path, PathBuf::from("/var/www/shop/modules/TestModule"));
    }

    #[test]
    fn empty_declared_path_is_rejected() {
        let adapter = FilesystemShopAdapter::new("/var/www/shop/modules");
        let module = ModuleConfiguration::new(ModuleId::new("testModuleId").unwrap(), "");

        assert!(adapter.module_full_path(&module).is_err());
    }
}
