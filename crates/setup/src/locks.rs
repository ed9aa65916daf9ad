//! Per-shop write serialization.
//!
//! Activation performs a read-merge-write on the shop's shared class
//! extensions chain; two concurrent writers for the same shop would lose
//! updates. Shops are independent units of isolation, so the lock is keyed
//! by shop id — no cross-shop locking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use shopforge_core::ShopId;

/// Registry of per-shop write locks.
#[derive(Debug, Default)]
pub struct ShopLocks {
    locks: Mutex<HashMap<ShopId, Arc<Mutex<()>>>>,
}

impl ShopLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the shop's write lock. Callers hold the guard for the whole
    /// read-merge-write sequence.
    pub fn handle(&self, shop_id: ShopId) -> Arc<Mutex<()>> {
        // Registry poisoning is recoverable: the map only ever gains entries.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(shop_id).or_default().clone()
    }
}
