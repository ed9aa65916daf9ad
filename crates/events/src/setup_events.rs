//! Module lifecycle events.
//!
//! Published by the activation service strictly after the shop configuration
//! commit, so subscribers never observe an event for state that was rolled
//! back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopforge_core::{ModuleId, ShopId};

use crate::event::Event;

/// Event: a module became active for a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleActivated {
    pub event_id: Uuid,
    pub shop_id: ShopId,
    pub module_id: ModuleId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a module became inactive for a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDeactivated {
    pub event_id: Uuid,
    pub shop_id: ShopId,
    pub module_id: ModuleId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleSetupEvent {
    Activated(ModuleActivated),
    Deactivated(ModuleDeactivated),
}

impl ModuleSetupEvent {
    pub fn activated(shop_id: ShopId, module_id: ModuleId) -> Self {
        Self::Activated(ModuleActivated {
            event_id: Uuid::now_v7(),
            shop_id,
            module_id,
            occurred_at: Utc::now(),
        })
    }

    pub fn deactivated(shop_id: ShopId, module_id: ModuleId) -> Self {
        Self::Deactivated(ModuleDeactivated {
            event_id: Uuid::now_v7(),
            shop_id,
            module_id,
            occurred_at: Utc::now(),
        })
    }

    pub fn shop_id(&self) -> ShopId {
        match self {
            Self::Activated(e) => e.shop_id,
            Self::Deactivated(e) => e.shop_id,
        }
    }

    pub fn module_id(&self) -> &ModuleId {
        match self {
            Self::Activated(e) => &e.module_id,
            Self::Deactivated(e) => &e.module_id,
        }
    }
}

impl Event for ModuleSetupEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Activated(_) => "module.activated",
            Self::Deactivated(_) => "module.deactivated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Activated(e) => e.occurred_at,
            Self::Deactivated(e) => e.occurred_at,
        }
    }
}
