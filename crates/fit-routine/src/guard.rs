//! Per-user admission for generation runs.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Tracks which users currently have a generation in flight.
///
/// Cloning shares the same set. At most one [`GenerationPermit`] exists per
/// user at a time; it is released when dropped.
#[derive(Debug, Clone, Default)]
pub struct GenerationGuard {
    active: Arc<Mutex<HashSet<i64>>>,
}

impl GenerationGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `user_id`, or `None` if it is already taken.
    #[must_use]
    pub fn try_acquire(&self, user_id: i64) -> Option<GenerationPermit> {
        if self.lock().insert(user_id) {
            Some(GenerationPermit {
                user_id,
                active: Arc::clone(&self.active),
            })
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_active(&self, user_id: i64) -> bool {
        self.lock().contains(&user_id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<i64>> {
        // The set stays consistent even if a holder panicked mid-operation.
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Held for the duration of one user's generation run.
#[derive(Debug)]
pub struct GenerationPermit {
    user_id: i64,
    active: Arc<Mutex<HashSet<i64>>>,
}

impl GenerationPermit {
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }
}

impl Drop for GenerationPermit {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}
