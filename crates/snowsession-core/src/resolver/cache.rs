//! Single-slot session cache

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Holds at most one live session
///
/// Starts empty and lives as long as its owner. Nothing here closes the
/// session; dropping the last `Arc` does.
pub struct ConnectionCache<S> {
    slot: Mutex<Option<Arc<S>>>,
}

impl<S> Default for ConnectionCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ConnectionCache<S> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// The cached session, if any
    pub fn get(&self) -> Option<Arc<S>> {
        self.slot.lock().clone()
    }

    /// Store `session`, replacing any previous one
    pub fn set(&self, session: Arc<S>) {
        *self.slot.lock() = Some(session);
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<S> fmt::Debug for ConnectionCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionCache")
            .field("populated", &!self.is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let cache: ConnectionCache<String> = ConnectionCache::new();
        assert!(cache.is_empty());
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_set_and_get_same_handle() {
        let cache = ConnectionCache::new();
        let session = Arc::new("session-1".to_string());
        cache.set(Arc::clone(&session));

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &session));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_set_overwrites() {
        let cache = ConnectionCache::new();
        cache.set(Arc::new(1));
        cache.set(Arc::new(2));
        assert_eq!(*cache.get().unwrap(), 2);
    }

    #[test]
    fn test_debug() {
        let cache = ConnectionCache::new();
        assert_eq!(format!("{cache:?}"), "ConnectionCache { populated: false }");
        cache.set(Arc::new(()));
        assert_eq!(format!("{cache:?}"), "ConnectionCache { populated: true }");
    }
}
