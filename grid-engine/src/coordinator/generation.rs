//! Request generations for ordering async refreshes.

use std::fmt;

/// Token identifying one dispatched change.
///
/// Generations increase monotonically per grid. A response tagged with an
/// older generation than the latest dispatched one has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic generation counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: u64,
    committed: Option<u64>,
}

impl GenerationCounter {
    /// Create a counter with nothing issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation, superseding every earlier one.
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// The most recently issued generation, if any.
    pub fn latest(&self) -> Option<Generation> {
        (self.latest > 0).then_some(Generation(self.latest))
    }

    /// The generation whose result was last committed.
    pub fn committed(&self) -> Option<Generation> {
        self.committed.map(Generation)
    }

    /// Returns `true` if `generation` is the latest and has not been
    /// committed yet.
    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest && self.committed != Some(generation.0)
    }

    /// Mark `generation` as committed. Returns `false` if it is not current.
    pub fn commit(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.committed = Some(generation.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic() {
        let mut counter = GenerationCounter::new();
        assert_eq!(counter.latest(), None);
        let first = counter.issue();
        let second = counter.issue();
        assert!(second > first);
        assert_eq!(counter.latest(), Some(second));
    }

    #[test]
    fn test_only_latest_commits_once() {
        let mut counter = GenerationCounter::new();
        let first = counter.issue();
        let second = counter.issue();

        assert!(!counter.commit(first));
        assert!(counter.commit(second));
        assert!(!counter.commit(second));
        assert_eq!(counter.committed(), Some(second));
    }
}
