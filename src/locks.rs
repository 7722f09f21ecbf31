use crate::types::EntityId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-entity action locks
///
/// Serializes accessory actions against the same entity while letting
/// different entities proceed concurrently. Acquisition is two-phase: clone
/// the entity's `Arc<Mutex>` out of the map under the std lock, then await
/// the tokio lock outside it, so a held entity lock never blocks lookups
/// for other entities.
#[derive(Default)]
pub(crate) struct LockMap {
    locks: Mutex<HashMap<EntityId, Arc<tokio::sync::Mutex<()>>>>,
}

impl LockMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for an entity id
    pub(crate) fn entry(&self, id: &EntityId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(id.clone()).or_default().clone()
    }
}
