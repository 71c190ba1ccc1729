//! # SSTF Selector
//!
//! Picks the pending request closest to the head.
//!
//! Selection runs in two passes over the queue. The first pass finds the
//! minimum seek distance; the second returns the first request in queue order
//! at that distance. Ties therefore always go to the oldest request.
//!
//! Both passes are O(n) in queue depth, so draining a full queue is O(n²).

use crate::head::{HeadPosition, SeekDistance};
use crate::queue::RequestQueue;
use crate::request::{IoRequest, RequestId, Sector};

/// Outcome of a selection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Selected request
    pub id: RequestId,
    /// Its start sector
    pub sector: Sector,
    /// Seek distance from the head
    pub distance: SeekDistance,
}

/// Shortest-seek-time-first selection
#[derive(Debug, Clone, Copy, Default)]
pub struct SstfSelector;

impl SstfSelector {
    /// Minimum seek distance from `head` over `requests`
    ///
    /// The running minimum starts at the first request's distance. Returns
    /// `None` when there are no requests.
    pub fn min_distance<'a, R, I>(&self, requests: I, head: &HeadPosition) -> Option<SeekDistance>
    where
        R: IoRequest + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut distances = requests.into_iter().map(|rq| {
            let distance = head.distance_to(rq.sector());

            #[cfg(feature = "trace-seeks")]
            log::trace!("sstf: rq {} at {} distance {}", rq.id(), rq.sector(), distance);

            distance
        });

        let mut min = distances.next()?;
        for distance in distances {
            if distance < min {
                min = distance;
            }
        }

        Some(min)
    }

    /// Select the next request to dispatch
    ///
    /// Does not modify the queue or the head.
    pub fn select<R: IoRequest>(
        &self,
        queue: &RequestQueue<R>,
        head: &HeadPosition,
    ) -> Option<Selection> {
        let min = self.min_distance(queue, head)?;

        #[cfg(feature = "trace-seeks")]
        log::trace!("sstf: minimum distance {} from head {}", min, head.sector());

        queue
            .iter()
            .find(|rq| head.distance_to(rq.sector()) == min)
            .map(|rq| Selection {
                id: rq.id(),
                sector: rq.sector(),
                distance: min,
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================
