use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// What a registration writes to, used to serialize concurrent writers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentityKey {
    File(i32),
    /// Root ID plus the lower-cased root-relative path.
    Location { folder_root_id: i32, path: String },
}

/// Keyed async mutexes, created on demand and dropped with their last holder.
#[derive(Debug, Default)]
pub struct IdentityLocks {
    slots: DashMap<IdentityKey, Arc<Mutex<()>>>,
}

/// Holds one identity until dropped.
pub struct IdentityGuard<'a> {
    locks: &'a IdentityLocks,
    key: IdentityKey,
    slot: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl IdentityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: IdentityKey) -> IdentityGuard<'_> {
        // The shard lock must be released before awaiting.
        let slot = self.slots.entry(key.clone()).or_default().value().clone();
        let guard = Arc::clone(&slot).lock_owned().await;
        IdentityGuard {
            locks: self,
            key,
            slot,
            guard: Some(guard),
        }
    }

    /// Acquire several keys in a fixed order so two callers never deadlock.
    pub async fn acquire_all(&self, mut keys: Vec<IdentityKey>) -> Vec<IdentityGuard<'_>> {
        keys.sort();
        keys.dedup();
        let mut guards = Vec::with_capacity(keys.len());
        for key in keys {
            guards.push(self.acquire(key).await);
        }
        guards
    }

    /// Number of identities currently held or waited on.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl IdentityGuard<'_> {
    pub fn key(&self) -> &IdentityKey {
        &self.key
    }
}

impl Drop for IdentityGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Two references left means only the map and this guard know the slot.
        self.locks.slots.remove_if(&self.key, |_, slot| {
            Arc::ptr_eq(slot, &self.slot) && Arc::strong_count(slot) == 2
        });
    }
}
