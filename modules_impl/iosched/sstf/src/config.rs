//! # Elevator Configuration
//!
//! Per-device parameters fixed at attach time.

use crate::request::Sector;

/// Default number of queue slots reserved at init
pub const DEFAULT_QUEUE_DEPTH: usize = 128;

/// SSTF elevator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SstfConfig {
    /// Sector the head is assumed to be parked at before the first dispatch
    pub initial_head: Sector,
    /// Queue slots reserved up front
    pub queue_depth_hint: usize,
}

impl SstfConfig {
    /// Create the default configuration
    pub const fn new() -> Self {
        Self {
            initial_head: 0,
            queue_depth_hint: DEFAULT_QUEUE_DEPTH,
        }
    }

    /// Set the initial head sector
    pub const fn with_initial_head(mut self, sector: Sector) -> Self {
        self.initial_head = sector;
        self
    }

    /// Set the number of slots reserved at init
    pub const fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth_hint = depth;
        self
    }
}

impl Default for SstfConfig {
    fn default() -> Self {
        Self::new()
    }
}
