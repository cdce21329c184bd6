//! Debounce for publish-triggered submissions.
//!
//! A resource that is republished several times in quick succession should be
//! submitted once. [`DedupGuard`] remembers, per resource id, until when further
//! automatic submissions are suppressed. Entries expire on their own; nothing
//! ever releases them early. Manual submissions do not consult the guard.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::debug;

/// Time-bounded map from resource id to the instant its lock expires.
#[derive(Debug)]
pub struct DedupGuard {
    locks: Mutex<HashMap<String, Instant>>,
    ttl: Duration,
}

impl DedupGuard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Takes the lock for `resource_id`.
    ///
    /// Returns `false` if an unexpired lock is already held, in which case the
    /// caller must skip the automatic submission entirely.
    pub fn try_acquire(&self, resource_id: &str) -> bool {
        self.try_acquire_at(resource_id, Instant::now())
    }

    fn try_acquire_at(&self, resource_id: &str, now: Instant) -> bool {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        // Drop expired entries so the map stays bounded by recent activity.
        locks.retain(|_, expires_at| *expires_at > now);

        if locks.contains_key(resource_id) {
            debug!("Skipping duplicate automatic submission for resource {resource_id}");
            return false;
        }
        locks.insert(resource_id.to_string(), now + self.ttl);
        true
    }

    /// Number of unexpired locks.
    #[cfg(test)]
    fn active(&self) -> usize {
        let now = Instant::now();
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|expires_at| **expires_at > now)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_second_acquire_within_ttl_fails() {
        let guard = DedupGuard::new(Duration::from_secs(30));
        assert!(guard.try_acquire("42"));
        assert!(!guard.try_acquire("42"));
        assert_eq!(guard.active(), 1);
    }

    #[test]
    fn test_independent_resources() {
        let guard = DedupGuard::new(Duration::from_secs(30));
        assert!(guard.try_acquire("1"));
        assert!(guard.try_acquire("2"));
        assert_eq!(guard.active(), 2);
    }

    #[test]
    fn test_lock_expires_after_ttl() {
        let guard = DedupGuard::new(Duration::from_secs(30));
        let start = Instant::now();
        assert!(guard.try_acquire_at("42", start));
        assert!(!guard.try_acquire_at("42", start + Duration::from_secs(29)));
        assert!(guard.try_acquire_at("42", start + Duration::from_secs(31)));
    }

    #[test]
    fn test_expired_entries_are_pruned() {
        let guard = DedupGuard::new(Duration::from_secs(1));
        let start = Instant::now();
        for id in 0..10 {
            assert!(guard.try_acquire_at(&id.to_string(), start));
        }
        assert!(guard.try_acquire_at("fresh", start + Duration::from_secs(2)));
        let locks = guard.locks.lock().unwrap();
        assert_eq!(locks.len(), 1);
        assert!(locks.contains_key("fresh"));
    }

    #[test]
    fn test_concurrent_acquires_grant_exactly_one() {
        let guard = Arc::new(DedupGuard::new(Duration::from_secs(30)));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let guard = Arc::clone(&guard);
                std::thread::spawn(move || guard.try_acquire("same"))
            })
            .collect();
        let granted = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .filter(|acquired| *acquired)
            .count();
        assert_eq!(granted, 1);
    }
}
