//! Request epochs for fencing out-of-order responses.
//!
//! Each request category (suggestions, search) owns one `EpochCounter`.
//! Issuing a request advances the counter and captures the new value; a
//! response is applied only if its captured epoch still equals the counter.

use std::fmt;

/// Snapshot of a category's counter taken when a request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestEpoch(u64);

impl RequestEpoch {
    /// Epoch before any request has been issued.
    pub const INITIAL: Self = Self(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonically increasing counter for one request category.
#[derive(Debug, Clone, Default)]
pub struct EpochCounter {
    current: RequestEpoch,
}

impl EpochCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter and return the new epoch.
    ///
    /// Every response captured under an earlier epoch becomes stale.
    pub fn advance(&mut self) -> RequestEpoch {
        self.current = RequestEpoch(self.current.0.saturating_add(1));
        self.current
    }

    pub fn current(&self) -> RequestEpoch {
        self.current
    }

    /// True if a response captured at `epoch` may still be applied.
    pub fn is_current(&self, epoch: RequestEpoch) -> bool {
        self.current == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_counter_starts_at_initial_epoch() {
        let counter = EpochCounter::new();
        assert_eq!(counter.current(), RequestEpoch::INITIAL);
    }

    #[test]
    fn advance_is_strictly_increasing() {
        let mut counter = EpochCounter::new();
        let first = counter.advance();
        let second = counter.advance();

        assert!(second > first);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn only_latest_epoch_is_current() {
        let mut counter = EpochCounter::new();
        let first = counter.advance();
        let second = counter.advance();

        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn display_prefixes_hash() {
        let mut counter = EpochCounter::new();
        assert_eq!(counter.advance().to_string(), "#1");
    }
}
