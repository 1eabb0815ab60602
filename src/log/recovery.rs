//! Log Recovery
//!
//! Rebuilds the cursor after a restart by replaying the region from its start.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::device::StorageDevice;

use super::{device_crc, CursorState, RecordHeader, PAYLOAD_OFFSET};

/// Replays a region to find its newest record
pub struct LogRecovery;

/// Why the scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The next byte is not a record header (erased space or garbage)
    NoHeader,

    /// A record header was found but its checksum did not match
    ChecksumMismatch,

    /// A record header claims more bytes than the region has left
    Truncated,

    /// The scan reached the end of the region
    RegionEnd,
}

/// Whether the region held an item at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InitStatus {
    EmptyMemory,
    Recovered,
}

/// Result of a recovery scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecoveryReport {
    /// Cursor of the last valid record, or the empty sentinel
    pub cursor: CursorState,

    /// Number of valid records walked over
    pub records_scanned: u64,

    /// Why the scan ended
    pub stop_reason: StopReason,

    /// Address the scan ended at
    pub stopped_at: u32,
}

impl RecoveryReport {
    pub fn status(&self) -> InitStatus {
        if self.cursor.is_empty() {
            InitStatus::EmptyMemory
        } else {
            InitStatus::Recovered
        }
    }
}

impl LogRecovery {
    /// Scan the region and return the newest valid record
    ///
    /// Records are appended in address order, so the walk stops at the first
    /// position that does not hold a valid record. A torn final write fails
    /// its checksum and the record before it stays current.
    pub fn recover<D: StorageDevice + ?Sized>(device: &D, config: &Config) -> RecoveryReport {
        let end = config.end() as u64;
        let mut offset = config.start;
        let mut cursor = CursorState::empty(config.start);
        let mut records_scanned: u64 = 0;

        let stop_reason = loop {
            if offset as u64 >= end {
                break StopReason::RegionEnd;
            }

            if device.read_byte(offset) != config.header_magic {
                break StopReason::NoHeader;
            }

            if offset as u64 + PAYLOAD_OFFSET as u64 > end {
                break StopReason::Truncated;
            }

            let header = RecordHeader::read_from(device, offset);
            let total = header.total_size() as u32;
            if offset as u64 + total as u64 > end {
                break StopReason::Truncated;
            }

            let crc_address = offset + PAYLOAD_OFFSET as u32 + header.data_size as u32;
            let stored = device.read_byte(crc_address);
            let computed = device_crc(&config.crc, &header, device, offset + PAYLOAD_OFFSET as u32);
            if stored != computed {
                warn!(
                    address = offset,
                    counter = header.counter,
                    "ignoring record with bad checksum at log tail"
                );
                break StopReason::ChecksumMismatch;
            }

            cursor = CursorState {
                counter: header.counter,
                address: offset,
                total_size: total,
            };
            records_scanned += 1;
            offset += total;
        };

        debug!(records_scanned, ?stop_reason, stopped_at = offset, "recovery scan finished");

        RecoveryReport {
            cursor,
            records_scanned,
            stop_reason,
            stopped_at: offset,
        }
    }
}
