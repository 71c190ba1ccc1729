//! # Elevator Statistics
//!
//! Counters are plain integers: the whole scheduler sits behind the host's
//! queue lock, so there is nothing to gain from atomics here.

use core::fmt;

use crate::head::SeekDistance;

/// Elevator statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedStats {
    /// Requests accepted into the queue
    pub added: u64,
    /// Requests dispatched to the device
    pub dispatched: u64,
    /// Requests removed by merge notifications
    pub merged: u64,
    /// Merge notifications for requests that were not queued
    pub merge_misses: u64,
    /// Submissions rejected because the request was already queued
    pub duplicate_adds: u64,
    /// Sum of dispatched seek distances (saturating)
    pub total_seek: SeekDistance,
    /// Largest single seek
    pub max_seek: SeekDistance,
    /// Deepest the queue has been
    pub peak_depth: usize,
}

impl SchedStats {
    pub(crate) fn record_add(&mut self, depth: usize) {
        self.added += 1;
        if depth > self.peak_depth {
            self.peak_depth = depth;
        }
    }

    pub(crate) fn record_dispatch(&mut self, distance: SeekDistance) {
        self.dispatched += 1;
        self.total_seek = self.total_seek.saturating_add(distance);
        if distance > self.max_seek {
            self.max_seek = distance;
        }
    }

    /// Mean seek distance per dispatch
    pub fn average_seek(&self) -> SeekDistance {
        if self.dispatched == 0 {
            0
        } else {
            self.total_seek / self.dispatched
        }
    }

    /// Requests accepted but not yet dispatched or merged away
    pub fn outstanding(&self) -> u64 {
        self.added.saturating_sub(self.dispatched + self.merged)
    }
}

impl fmt::Display for SchedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "added {}, dispatched {}, merged {}, avg seek {}, max seek {}, peak depth {}",
            self.added,
            self.dispatched,
            self.merged,
            self.average_seek(),
            self.max_seek,
            self.peak_depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_accounting() {
        let mut stats = SchedStats::default();
        assert_eq!(stats.average_seek(), 0);

        stats.record_add(1);
        stats.record_add(2);
        stats.record_dispatch(10);
        stats.record_dispatch(30);

        assert_eq!(stats.average_seek(), 20);
        assert_eq!(stats.max_seek, 30);
        assert_eq!(stats.peak_depth, 2);
        assert_eq!(stats.outstanding(), 0);
    }

    #[test]
    fn test_total_seek_saturates() {
        let mut stats = SchedStats::default();
        stats.record_dispatch(u64::MAX);
        stats.record_dispatch(5);
        assert_eq!(stats.total_seek, u64::MAX);
    }
}
