//! Cache Entry Module
//!
//! A value stamped with its computation time, checked against a staleness
//! window on every read.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached value and when it was computed.
///
/// Entries are overwritten wholesale on recomputation, so `computed_at` is
/// monotonically non-decreasing for a given key. Stale entries are not
/// removed; they simply stop being served and are superseded by the next
/// successful computation.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// When the value was computed (monotonic clock)
    pub computed_at: Instant,
    /// The cached value
    pub value: V,
}

impl<V> CacheEntry<V> {
    /// Stamps `value` with the current time.
    pub fn new(value: V) -> Self {
        Self {
            computed_at: Instant::now(),
            value,
        }
    }

    // == Is Fresh ==
    /// True while the entry's age is strictly inside the staleness window.
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.computed_at.elapsed() < window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_new_entry_is_fresh() {
        let entry = CacheEntry::new(42);
        assert!(entry.is_fresh(Duration::from_secs(60)));
        assert_eq!(entry.value, 42);
    }

    #[test]
    fn test_entry_goes_stale() {
        let entry = CacheEntry::new("v");
        sleep(Duration::from_millis(30));
        assert!(!entry.is_fresh(Duration::from_millis(10)));
    }

    #[test]
    fn test_zero_window_is_always_stale() {
        let entry = CacheEntry::new(());
        assert!(!entry.is_fresh(Duration::ZERO));
    }

    #[test]
    fn test_overwrite_advances_timestamp() {
        let first = CacheEntry::new(1);
        sleep(Duration::from_millis(5));
        let second = CacheEntry::new(2);
        assert!(second.computed_at >= first.computed_at);
    }
}
