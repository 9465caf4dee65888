//! Per-meter mutation locks

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serializes reading mutations per meter.
///
/// The "read meter + top-two readings, validate, write reading, recompute
/// snapshot" sequence must not interleave for one meter, otherwise two
/// concurrent creates could both pass the ordering check against the same
/// "last" reading. Operations on different meters stay independent.
#[derive(Default)]
pub struct MeterLockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl MeterLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the lock for one meter, waiting if another mutation holds it.
    pub async fn acquire(&self, meter_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(meter_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

// ── Tests ──────────────────────────────────────────────────────
