//! Cursor state
//!
//! Volatile pointer to the newest record in the region.

use serde::{Deserialize, Serialize};

/// Location and version of the current record
///
/// `total_size == 0` marks the empty sentinel: no record is current and the
/// next append lands at `address`, the region start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    /// Version counter of the current record
    pub counter: u16,

    /// Device address of the current record's header byte
    pub address: u32,

    /// Device footprint of the current record
    pub total_size: u32,
}

impl CursorState {
    /// The empty sentinel for a region starting at `start`
    pub fn empty(start: u32) -> Self {
        Self {
            counter: 0,
            address: start,
            total_size: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_size == 0
    }

    /// Where the next record will be appended
    pub fn next_address(&self) -> u32 {
        self.address + self.total_size
    }

    /// Payload length of the current record
    pub fn data_size(&self) -> usize {
        (self.total_size as usize).saturating_sub(super::RECORD_OVERHEAD)
    }
}
