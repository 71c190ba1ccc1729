//! # Block Requests
//!
//! The elevator never owns requests. The block layer allocates them and
//! queues a handle; the only things the elevator reads from a handle are its
//! identity and its start sector.

use alloc::sync::Arc;

use bitflags::bitflags;

/// Device offset in sectors
pub type Sector = u64;

/// Request identity, unique among requests queued on one device
pub type RequestId = u64;

/// A queued block request handle
///
/// Implemented by whatever the host queues: a borrowed request, a shared
/// pointer, or a small copyable descriptor.
pub trait IoRequest {
    /// Identity used for queue membership
    fn id(&self) -> RequestId;

    /// Start sector the request targets
    fn sector(&self) -> Sector;
}

impl<T: IoRequest + ?Sized> IoRequest for &T {
    fn id(&self) -> RequestId {
        (**self).id()
    }

    fn sector(&self) -> Sector {
        (**self).sector()
    }
}

impl<T: IoRequest + ?Sized> IoRequest for Arc<T> {
    fn id(&self) -> RequestId {
        (**self).id()
    }

    fn sector(&self) -> Sector {
        (**self).sector()
    }
}

bitflags! {
    /// Request operation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RequestFlags: u32 {
        /// Read from the device
        const READ = 1 << 0;
        /// Write to the device
        const WRITE = 1 << 1;
        /// Synchronous (a task is waiting on completion)
        const SYNC = 1 << 2;
        /// Filesystem metadata
        const META = 1 << 3;
        /// Force unit access
        const FUA = 1 << 4;
    }
}

/// Block request descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRequest {
    /// Request ID
    pub id: RequestId,
    /// Starting sector
    pub sector: Sector,
    /// Number of sectors
    pub count: u32,
    /// Operation flags
    pub flags: RequestFlags,
}

impl BlockRequest {
    /// Create a request
    pub const fn new(id: RequestId, sector: Sector, count: u32, flags: RequestFlags) -> Self {
        Self {
            id,
            sector,
            count,
            flags,
        }
    }

    /// Create a read request
    pub const fn read(id: RequestId, sector: Sector, count: u32) -> Self {
        Self::new(id, sector, count, RequestFlags::READ)
    }

    /// Create a write request
    pub const fn write(id: RequestId, sector: Sector, count: u32) -> Self {
        Self::new(id, sector, count, RequestFlags::WRITE)
    }

    /// Mark the request synchronous
    pub const fn sync(mut self) -> Self {
        self.flags = self.flags.union(RequestFlags::SYNC);
        self
    }

    /// End sector (exclusive)
    pub fn end_sector(&self) -> Sector {
        self.sector.saturating_add(self.count as u64)
    }

    /// Is this a write?
    pub fn is_write(&self) -> bool {
        self.flags.contains(RequestFlags::WRITE)
    }
}

impl IoRequest for BlockRequest {
    fn id(&self) -> RequestId {
        self.id
    }

    fn sector(&self) -> Sector {
        self.sector
    }
}

static_assertions::assert_impl_all!(BlockRequest: Send, Sync, Copy);

// =============================================================================
// TESTS
// =============================================================================
