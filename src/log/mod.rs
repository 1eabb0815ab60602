//! Versioned Log Module
//!
//! Wear leveling through append-only versioning of a single item.
//!
//! ## Responsibilities
//! - Append each new version after the previous one instead of rewriting it
//! - CRC-8 checksums for corruption detection
//! - 16-bit version counters for ordering
//! - Crash recovery by replaying the log from the region start
//! - Erase-all when the next record would run off the region end
//!
//! ## Region Format
//! ```text
//! start                                                        start+size
//! ┌──────────────┬──────────────┬─────┬──────────────┬──────────────────┐
//! │ Record 1     │ Record 2     │ ... │ Record N     │ erased (0xFF...) │
//! └──────────────┴──────────────┴─────┴──────────────┴──────────────────┘
//!
//! Record
//! ┌─────────┬─────────┬─────────┬─────────┬──────────────┬─────────┐
//! │Magic (1)│ Cnt Hi  │ Cnt Lo  │ Size (1)│ Data (Size)  │ CRC (1) │
//! └─────────┴─────────┴─────────┴─────────┴──────────────┴─────────┘
//! ```
//!
//! Only record N is live. Older records stay on the device until the region
//! fills up and is erased as a whole.

mod cursor;
mod reader;
mod record;
mod recovery;
mod writer;

pub use cursor::CursorState;
pub use reader::LogReader;
pub use record::{
    device_crc, encode_record, record_crc, total_size, Item, RecordHeader, CRC_SIZE,
    PAYLOAD_OFFSET, RECORD_OVERHEAD,
};
pub use recovery::{InitStatus, LogRecovery, RecoveryReport, StopReason};
pub use writer::LogWriter;
