//! # Elevator Interface
//!
//! The operations a block layer needs from an I/O scheduling policy. How a
//! policy is chosen and wired into the dispatch path belongs to the host;
//! this trait is the seam it binds to.
//!
//! Every method assumes the caller holds the device queue lock. Hosts that
//! do not already have one can wrap the elevator in a [`LockedElevator`].

use spin::{Mutex, MutexGuard};

use crate::error::SchedResult;
use crate::request::IoRequest;
use crate::scheduler::SstfScheduler;
use crate::ELEVATOR_NAME;

/// Block I/O elevator operations
pub trait Elevator {
    /// Request handle the elevator queues
    type Request: IoRequest;

    /// Policy name
    fn name(&self) -> &'static str;

    /// A new request targets this device
    fn add_request(&mut self, rq: Self::Request) -> SchedResult<()>;

    /// Next request to send to hardware, if any
    fn dispatch_request(&mut self) -> Option<Self::Request>;

    /// `absorbed` was merged into `survivor` by the block layer
    fn merged_requests(
        &mut self,
        absorbed: &Self::Request,
        survivor: &Self::Request,
    ) -> Option<Self::Request>;

    /// Request queued before `rq`
    fn former_request(&self, rq: &Self::Request) -> Option<&Self::Request>;

    /// Request queued after `rq`
    fn latter_request(&self, rq: &Self::Request) -> Option<&Self::Request>;

    /// Are requests waiting?
    fn has_pending(&self) -> bool;
}

impl<R: IoRequest> Elevator for SstfScheduler<R> {
    type Request = R;

    fn name(&self) -> &'static str {
        ELEVATOR_NAME
    }

    fn add_request(&mut self, rq: R) -> SchedResult<()> {
        self.add(rq)
    }

    fn dispatch_request(&mut self) -> Option<R> {
        self.dispatch()
    }

    fn merged_requests(&mut self, absorbed: &R, survivor: &R) -> Option<R> {
        self.on_merge(absorbed, survivor)
    }

    fn former_request(&self, rq: &R) -> Option<&R> {
        self.predecessor(rq)
    }

    fn latter_request(&self, rq: &R) -> Option<&R> {
        self.successor(rq)
    }

    fn has_pending(&self) -> bool {
        !self.is_empty()
    }
}

// =============================================================================
// LOCKED ELEVATOR
// =============================================================================

/// An elevator behind its own queue lock
#[derive(Debug)]
pub struct LockedElevator<E> {
    inner: Mutex<E>,
}

impl<E: Elevator> LockedElevator<E> {
    /// Wrap an elevator
    pub const fn new(elevator: E) -> Self {
        Self {
            inner: Mutex::new(elevator),
        }
    }

    /// Take the queue lock
    pub fn lock(&self) -> MutexGuard<'_, E> {
        self.inner.lock()
    }

    /// Queue a request
    pub fn add_request(&self, rq: E::Request) -> SchedResult<()> {
        self.inner.lock().add_request(rq)
    }

    /// Dispatch the next request
    pub fn dispatch_request(&self) -> Option<E::Request> {
        self.inner.lock().dispatch_request()
    }

    /// Forward a merge notification
    pub fn merged_requests(
        &self,
        absorbed: &E::Request,
        survivor: &E::Request,
    ) -> Option<E::Request> {
        self.inner.lock().merged_requests(absorbed, survivor)
    }

    /// Are requests waiting?
    pub fn has_pending(&self) -> bool {
        self.inner.lock().has_pending()
    }

    /// Release the lock wrapper
    pub fn into_inner(self) -> E {
        self.inner.into_inner()
    }
}

// =============================================================================
// TESTS
// =============================================================================
