//! # Head Position
//!
//! Sector of the most recently dispatched request. Seek distances are
//! measured from here.

use crate::request::Sector;

/// Distance between two sectors
pub type SeekDistance = u64;

/// Last known position of the device head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadPosition {
    sector: Sector,
}

impl HeadPosition {
    /// Create a head parked at `sector`
    pub const fn new(sector: Sector) -> Self {
        Self { sector }
    }

    /// Current sector
    pub const fn sector(&self) -> Sector {
        self.sector
    }

    /// Absolute distance from the head to `target`
    pub const fn distance_to(&self, target: Sector) -> SeekDistance {
        if target > self.sector {
            target - self.sector
        } else {
            self.sector - target
        }
    }

    /// Move the head to `target`, returning the distance travelled
    pub fn seek_to(&mut self, target: Sector) -> SeekDistance {
        let distance = self.distance_to(target);
        self.sector = target;
        distance
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let head = HeadPosition::new(90);
        assert_eq!(head.distance_to(100), 10);
        assert_eq!(head.distance_to(50), 40);
        assert_eq!(head.distance_to(90), 0);
    }

    #[test]
    fn test_distance_extremes() {
        let head = HeadPosition::new(u64::MAX);
        assert_eq!(head.distance_to(0), u64::MAX);
        assert_eq!(HeadPosition::default().distance_to(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_seek_to() {
        let mut head = HeadPosition::default();
        assert_eq!(head.sector(), 0);
        assert_eq!(head.seek_to(120), 120);
        assert_eq!(head.seek_to(100), 20);
        assert_eq!(head.sector(), 100);
    }
}
