//! Per-slot async locks
//!
//! Every operation that flips a slot's `is_available` flag runs while holding
//! the lock for that slot, so mutations of one slot are applied one at a time
//! inside this process. Different slots never contend.
//!
//! An entry lives only while someone holds or waits for it; the last
//! [`SlotGuard`] to drop removes it.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i32, Arc<Mutex<()>>>;

#[derive(Default)]
pub struct SlotLocks {
    locks: Arc<LockMap>,
}

/// Exclusive access to one slot, released on drop.
pub struct SlotGuard {
    slot_id: i32,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters hold a clone of the Arc, so a count of one means the map
        // is the only owner left.
        self.locks
            .remove_if(&self.slot_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl SlotLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `slot_id`.
    pub async fn acquire(&self, slot_id: i32) -> SlotGuard {
        let lock = self
            .locks
            .entry(slot_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        SlotGuard {
            slot_id,
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_slot_is_exclusive() {
        let locks = Arc::new(SlotLocks::new());
        let guard = locks.acquire(7).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.acquire(7).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());
        assert_eq!(locks.len(), 1);

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn different_slots_do_not_contend() {
        let locks = SlotLocks::new();
        let _a = locks.acquire(1).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2)).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn released_lock_leaves_no_entry() {
        let locks = SlotLocks::new();
        for slot_id in 1..=100 {
            drop(locks.acquire(slot_id).await);
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn entry_survives_while_a_waiter_is_queued() {
        let locks = Arc::new(SlotLocks::new());
        let first = locks.acquire(4).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move { locks.acquire(4).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(first);
        let second = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(locks.len(), 1);

        drop(second);
        assert!(locks.is_empty());
    }
}
