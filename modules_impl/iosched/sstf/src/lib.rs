//! # Helix SSTF I/O Scheduler
//!
//! Shortest-Seek-Time-First elevator for single-queue block devices.
//!
//! The elevator keeps the pending requests of one device and, each time the
//! block layer asks for work, hands back the request whose start sector is
//! closest to the sector of the last dispatched request.
//!
//! ## Components
//!
//! - **Request Queue**: insertion-ordered pending requests with O(1) removal
//!   and neighbor lookup
//! - **Head Position**: sector of the most recently dispatched request
//! - **Selector**: two-pass minimum seek distance scan
//! - **Scheduler**: the per-device facade the block layer drives
//! - **Elevator**: trait binding any policy to a host dispatch path
//!
//! ## Usage
//!
//! ```rust,ignore
//! use helix_iosched_sstf::{BlockRequest, SstfScheduler};
//!
//! let mut sched = SstfScheduler::init()?;
//! sched.add(BlockRequest::read(1, 100, 8))?;
//! sched.add(BlockRequest::read(2, 50, 8))?;
//!
//! while let Some(rq) = sched.dispatch() {
//!     submit_to_hardware(rq);
//! }
//!
//! sched.teardown();
//! ```
//!
//! ## Locking
//!
//! The scheduler does no locking of its own. The host serializes every call,
//! either with its own queue lock or with [`LockedElevator`].

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod config;
pub mod elevator;
pub mod error;
pub mod head;
pub mod queue;
pub mod request;
pub mod scheduler;
pub mod selector;
pub mod stats;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::{SstfConfig, DEFAULT_QUEUE_DEPTH};
pub use elevator::{Elevator, LockedElevator};
pub use error::{SchedError, SchedResult};
pub use head::{HeadPosition, SeekDistance};
pub use queue::RequestQueue;
pub use request::{BlockRequest, IoRequest, RequestFlags, RequestId, Sector};
pub use scheduler::SstfScheduler;
pub use selector::{Selection, SstfSelector};
pub use stats::SchedStats;

/// Elevator name as exposed to the block layer
pub const ELEVATOR_NAME: &str = "sstf";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
