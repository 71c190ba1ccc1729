//! # SSTF Scheduler
//!
//! Per-device elevator instance driven by the block layer.
//!
//! ```text
//!   add() ──▶ ┌───────────────┐
//!             │ RequestQueue  │──▶ SstfSelector ──▶ dispatch() ──▶ hardware
//! on_merge() ─┤ (queue order) │         ▲               │
//!             └───────────────┘         │               ▼
//!                                  HeadPosition ◀── seek_to()
//! ```
//!
//! The head is read during selection and written only by a successful
//! dispatch. One instance exists per attached device and lives exactly as
//! long as the attachment.

use crate::config::SstfConfig;
use crate::error::SchedResult;
use crate::head::HeadPosition;
use crate::queue::{Iter, RequestQueue};
use crate::request::{BlockRequest, IoRequest, Sector};
use crate::selector::SstfSelector;
use crate::stats::SchedStats;

/// Shortest-seek-time-first elevator
#[derive(Debug)]
pub struct SstfScheduler<R> {
    queue: RequestQueue<R>,
    head: HeadPosition,
    selector: SstfSelector,
    stats: SchedStats,
}

impl<R: IoRequest> SstfScheduler<R> {
    /// Attach an elevator with the default configuration
    pub fn init() -> SchedResult<Self> {
        Self::init_with(SstfConfig::default())
    }

    /// Attach an elevator
    ///
    /// On allocation failure nothing is left behind and the host must not
    /// use the elevator.
    pub fn init_with(config: SstfConfig) -> SchedResult<Self> {
        let queue = RequestQueue::try_with_capacity(config.queue_depth_hint).map_err(|err| {
            log::debug!("sstf: init failed: {}", err);
            err
        })?;

        log::debug!(
            "sstf: elevator attached, head at {}, {} slots reserved",
            config.initial_head,
            config.queue_depth_hint
        );

        Ok(Self {
            queue,
            head: HeadPosition::new(config.initial_head),
            selector: SstfSelector,
            stats: SchedStats::default(),
        })
    }

    /// Detach the elevator
    ///
    /// # Panics
    ///
    /// Panics if requests are still queued. Every request must have been
    /// dispatched or merged away before detach; anything left would be lost
    /// I/O.
    pub fn teardown(self) -> SchedStats {
        assert!(
            self.queue.is_empty(),
            "sstf: teardown with {} request(s) still queued",
            self.queue.len()
        );

        log::info!("sstf: elevator detached: {}", self.stats);
        self.stats
    }

    /// Queue a request at the tail
    pub fn add(&mut self, rq: R) -> SchedResult<()> {
        if let Err(err) = self.queue.push_back(rq) {
            self.stats.duplicate_adds += 1;
            log::warn!("sstf: rejected submission: {}", err);
            return Err(err);
        }

        self.stats.record_add(self.queue.len());
        Ok(())
    }

    /// Take the request closest to the head
    ///
    /// Returns `None` when nothing is queued; the head does not move.
    pub fn dispatch(&mut self) -> Option<R> {
        let selection = self.selector.select(&self.queue, &self.head)?;
        let rq = self.queue.remove(selection.id)?;
        let distance = self.head.seek_to(selection.sector);
        self.stats.record_dispatch(distance);

        log::trace!(
            "sstf: dispatch rq {} at {} (seek {}, {} left)",
            selection.id,
            selection.sector,
            distance,
            self.queue.len()
        );

        Some(rq)
    }

    /// Request the next `dispatch` would return, without taking it
    pub fn peek(&self) -> Option<&R> {
        let selection = self.selector.select(&self.queue, &self.head)?;
        self.queue.get(selection.id)
    }

    /// `absorbed` was folded into `survivor` by the block layer
    ///
    /// Drops `absorbed` from the queue and hands its handle back. `survivor`
    /// is not touched. A notification for an unqueued request is ignored.
    pub fn on_merge(&mut self, absorbed: &R, survivor: &R) -> Option<R> {
        match self.queue.remove(absorbed.id()) {
            Some(rq) => {
                self.stats.merged += 1;
                log::trace!("sstf: rq {} merged into rq {}", absorbed.id(), survivor.id());
                Some(rq)
            },
            None => {
                self.stats.merge_misses += 1;
                log::debug!("sstf: merge of unqueued rq {} ignored", absorbed.id());
                None
            },
        }
    }

    /// Request queued just before `rq`
    pub fn predecessor(&self, rq: &R) -> Option<&R> {
        self.queue.predecessor(rq.id())
    }

    /// Request queued just after `rq`
    pub fn successor(&self, rq: &R) -> Option<&R> {
        self.queue.successor(rq.id())
    }

    /// Is `rq` queued?
    pub fn contains(&self, rq: &R) -> bool {
        self.queue.contains(rq.id())
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued requests
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Sector of the last dispatched request
    pub fn head_position(&self) -> Sector {
        self.head.sector()
    }

    /// Queued requests, oldest first
    pub fn iter(&self) -> Iter<'_, R> {
        self.queue.iter()
    }

    /// Statistics snapshot
    pub fn stats(&self) -> SchedStats {
        self.stats
    }
}

static_assertions::assert_impl_all!(SstfScheduler<BlockRequest>: Send, Sync);

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedError;
    use alloc::vec::Vec;

    fn sched_with(head: Sector, sectors: &[Sector]) -> SstfScheduler<BlockRequest> {
        let config = SstfConfig::default().with_initial_head(head);
        let mut sched = SstfScheduler::init_with(config).unwrap();
        for (i, &sector) in sectors.iter().enumerate() {
            sched.add(BlockRequest::read(i as u64 + 1, sector, 8)).unwrap();
        }
        sched
    }

    fn drain(sched: &mut SstfScheduler<BlockRequest>) -> Vec<Sector> {
        let mut order = Vec::new();
        while let Some(rq) = sched.dispatch() {
            order.push(rq.sector);
        }
        order
    }

    #[test]
    fn test_init_defaults() {
        let sched: SstfScheduler<BlockRequest> = SstfScheduler::init().unwrap();
        assert!(sched.is_empty());
        assert_eq!(sched.head_position(), 0);
        assert_eq!(sched.teardown(), SchedStats::default());
    }

    #[test]
    fn test_init_out_of_memory() {
        let config = SstfConfig::default().with_queue_depth(usize::MAX);
        let err = SstfScheduler::<BlockRequest>::init_with(config).unwrap_err();
        assert_eq!(err, SchedError::OutOfMemory);
    }

    #[test]
    fn test_dispatch_sequence() {
        let mut sched = sched_with(90, &[100, 50, 120]);

        let rq = sched.dispatch().unwrap();
        assert_eq!(rq.sector, 100);
        assert_eq!(sched.head_position(), 100);
        assert_eq!(sched.len(), 2);

        let rq = sched.dispatch().unwrap();
        assert_eq!(rq.sector, 120);
        assert_eq!(sched.head_position(), 120);

        assert_eq!(sched.dispatch().map(|rq| rq.sector), Some(50));
        assert!(sched.dispatch().is_none());
    }

    #[test]
    fn test_tie_break() {
        let mut sched = sched_with(90, &[70, 110]);
        assert_eq!(sched.dispatch().map(|rq| rq.id), Some(1));
    }

    #[test]
    fn test_empty_dispatch_keeps_head() {
        let mut sched = sched_with(42, &[]);
        for _ in 0..3 {
            assert!(sched.dispatch().is_none());
            assert_eq!(sched.head_position(), 42);
        }
        assert_eq!(sched.stats().dispatched, 0);
    }

    #[test]
    fn test_drain_order() {
        let mut sched = sched_with(53, &[98, 183, 37, 122, 14, 124, 65, 67]);
        assert_eq!(drain(&mut sched), [65, 67, 37, 14, 98, 122, 124, 183]);

        let stats = sched.teardown();
        assert_eq!(stats.dispatched, 8);
        assert_eq!(stats.total_seek, 236);
        assert_eq!(stats.max_seek, 84);
    }

    #[test]
    fn test_peek_matches_dispatch() {
        let mut sched = sched_with(90, &[100, 50, 120]);
        assert_eq!(sched.peek().map(|rq| rq.id), Some(1));
        assert_eq!(sched.len(), 3);
        assert_eq!(sched.head_position(), 90);
        assert_eq!(sched.dispatch().map(|rq| rq.id), Some(1));
        assert_eq!(sched.peek().map(|rq| rq.sector), Some(120));
    }

    #[test]
    fn test_merge_removes_absorbed_only() {
        let mut sched = sched_with(0, &[100, 108, 300]);
        let absorbed = BlockRequest::read(2, 108, 8);
        let survivor = BlockRequest::read(1, 100, 16);

        assert_eq!(sched.on_merge(&absorbed, &survivor).map(|rq| rq.id), Some(2));
        assert!(!sched.contains(&absorbed));
        assert!(sched.contains(&survivor));
        assert_eq!(sched.len(), 2);
        assert_eq!(sched.head_position(), 0);
        assert_eq!(sched.stats().merged, 1);
    }

    #[test]
    fn test_merge_of_unqueued_is_noop() {
        let mut sched = sched_with(77, &[100, 200]);
        let stranger = BlockRequest::write(99, 150, 8);
        let survivor = BlockRequest::read(1, 100, 8);

        assert!(sched.on_merge(&stranger, &survivor).is_none());
        assert!(sched.on_merge(&stranger, &survivor).is_none());
        assert_eq!(sched.len(), 2);
        assert_eq!(sched.head_position(), 77);
        assert_eq!(sched.stats().merge_misses, 2);
    }

    #[test]
    fn test_neighbors_follow_queue_order() {
        let sched = sched_with(0, &[500, 10, 300]);
        let first = BlockRequest::read(1, 500, 8);
        let middle = BlockRequest::read(2, 10, 8);
        let last = BlockRequest::read(3, 300, 8);

        assert!(sched.predecessor(&first).is_none());
        assert_eq!(sched.successor(&first).map(|rq| rq.id), Some(2));
        assert_eq!(sched.predecessor(&middle).map(|rq| rq.id), Some(1));
        assert_eq!(sched.successor(&middle).map(|rq| rq.id), Some(3));
        assert!(sched.successor(&last).is_none());
    }

    #[test]
    fn test_duplicate_add() {
        let mut sched = sched_with(0, &[10]);
        let err = sched.add(BlockRequest::read(1, 10, 8)).unwrap_err();
        assert_eq!(err, SchedError::AlreadyQueued(1));
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.stats().duplicate_adds, 1);
        assert_eq!(sched.stats().added, 1);
    }

    #[test]
    fn test_dispatched_request_can_be_resubmitted() {
        let mut sched = sched_with(0, &[10]);
        let rq = sched.dispatch().unwrap();
        sched.add(rq).unwrap();
        assert_eq!(sched.dispatch().map(|rq| rq.id), Some(1));
    }

    #[test]
    fn test_teardown_empty() {
        let mut sched = sched_with(0, &[5, 6]);
        drain(&mut sched);
        let stats = sched.teardown();
        assert_eq!(stats.outstanding(), 0);
        assert_eq!(stats.peak_depth, 2);
    }

    #[test]
    #[should_panic(expected = "still queued")]
    fn test_teardown_non_empty_panics() {
        let sched = sched_with(0, &[5]);
        sched.teardown();
    }
}
