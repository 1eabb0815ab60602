//! Log Reader
//!
//! Reads and validates the record the cursor points at.

use bytes::Bytes;
use tracing::warn;

use crate::config::Config;
use crate::device::StorageDevice;
use crate::error::{Result, WearLogError};

use super::{record_crc, CursorState, Item, RecordHeader, PAYLOAD_OFFSET, RECORD_OVERHEAD};

/// Read path over a region
///
/// Purely observational: never touches the cursor or the device contents.
pub struct LogReader<'a, D: StorageDevice + ?Sized> {
    device: &'a D,
    config: &'a Config,
    cursor: &'a CursorState,
}

impl<'a, D: StorageDevice + ?Sized> LogReader<'a, D> {
    pub fn new(device: &'a D, config: &'a Config, cursor: &'a CursorState) -> Self {
        Self {
            device,
            config,
            cursor,
        }
    }

    /// Read the current item, trusting the size stored in the record
    ///
    /// The stored size is bounded by the region, not by
    /// [`Config::max_data_size`], so anything recovery adopts stays readable.
    /// A size running past the region end is [`WearLogError::SizeTooLarge`].
    pub fn read(&self) -> Result<Item> {
        if self.cursor.is_empty() {
            return Err(WearLogError::EmptyStore);
        }

        let address = self.cursor.address;
        let header = RecordHeader::read_from(self.device, address);
        let size = header.data_size as usize;

        let room = self.payload_room(address);
        if size > room {
            return Err(WearLogError::SizeTooLarge { size, max: room });
        }

        let data = self.read_payload(address, size);
        self.check(address, &header, &data)?;

        Ok(Item {
            counter: header.counter,
            data: Bytes::from(data),
        })
    }

    /// Read exactly `expected_size` payload bytes of the current item
    ///
    /// The stored size byte is skipped and `expected_size` is used in its
    /// place, including for the checksum. A wrong size therefore fails with
    /// [`WearLogError::ChecksumMismatch`] rather than returning misaligned
    /// bytes.
    pub fn read_exact(&self, expected_size: usize) -> Result<Bytes> {
        let max = self.config.max_data_size();
        if expected_size > max {
            return Err(WearLogError::SizeTooLarge {
                size: expected_size,
                max,
            });
        }
        if self.cursor.is_empty() {
            return Err(WearLogError::EmptyStore);
        }

        let address = self.cursor.address;
        let room = self.payload_room(address);
        if expected_size > room {
            return Err(WearLogError::SizeTooLarge {
                size: expected_size,
                max: room,
            });
        }

        let stored = RecordHeader::read_from(self.device, address);
        let header = RecordHeader {
            data_size: expected_size as u8,
            ..stored
        };

        let data = self.read_payload(address, expected_size);
        self.check(address, &header, &data)?;

        Ok(Bytes::from(data))
    }

    /// Largest payload a record at `address` can have inside the region
    fn payload_room(&self, address: u32) -> usize {
        (self.config.end() as usize)
            .saturating_sub(address as usize)
            .saturating_sub(RECORD_OVERHEAD)
    }

    fn read_payload(&self, address: u32, size: usize) -> Vec<u8> {
        let payload = address + PAYLOAD_OFFSET as u32;
        (0..size as u32)
            .map(|i| self.device.read_byte(payload + i))
            .collect()
    }

    fn check(&self, address: u32, header: &RecordHeader, data: &[u8]) -> Result<()> {
        let crc_address = address + (PAYLOAD_OFFSET + data.len()) as u32;
        let stored = self.device.read_byte(crc_address);
        let computed = record_crc(&self.config.crc, header, data);

        if stored != computed {
            warn!(address, stored, computed, "checksum mismatch on read");
            return Err(WearLogError::ChecksumMismatch {
                address,
                stored,
                computed,
            });
        }
        Ok(())
    }
}
