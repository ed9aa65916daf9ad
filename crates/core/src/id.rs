//! Strongly-typed identifiers used across the configuration domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Identifier of a pluggable extension module.
///
/// Module ids are human-assigned names ("paypal", "testModuleId"), unique
/// within a shop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

/// Identifier of a single storefront instance (multi-shop deployments).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(u32);

/// Name of a deployment environment ("prod", "staging", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentId(String);

macro_rules! impl_name_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a validated identifier. Rejects empty or
            /// whitespace-only names.
            pub fn new(name: impl Into<String>) -> ConfigResult<Self> {
                let name = name.into();
                if name.trim().is_empty() {
                    return Err(ConfigError::invalid_id(concat!($name, " must not be empty")));
                }
                Ok(Self(name))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_name_newtype!(ModuleId, "ModuleId");
impl_name_newtype!(EnvironmentId, "EnvironmentId");

impl ShopId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ShopId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ShopId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ShopId> for u32 {
    fn from(value: ShopId) -> Self {
        value.0
    }
}
