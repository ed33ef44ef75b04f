use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::ChatId;

type LockMap = HashMap<ChatId, Arc<AsyncMutex<()>>>;

/// One async mutex per chat id, alive only while someone holds or awaits it.
///
/// Chat ids come from clients, so an entry is removed as soon as its last
/// guard is dropped and no other task is queued on it.
#[derive(Default)]
pub struct ChatLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Exclusive hold on one chat id. Dropping it releases the lock.
pub struct ChatLockGuard {
    id: ChatId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<Mutex<LockMap>>,
}

impl ChatLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other holder has `id` locked.
    pub async fn lock(&self, id: &ChatId) -> ChatLockGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(id.clone()).or_default())
        };
        let guard = lock.lock_owned().await;

        ChatLockGuard {
            id: id.clone(),
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of chat ids currently held or awaited.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for ChatLockGuard {
    fn drop(&mut self) {
        // Release first so the entry's strong count only counts waiters.
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        let idle = locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            locks.remove(&self.id);
        }
    }
}
