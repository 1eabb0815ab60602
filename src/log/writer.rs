//! Log Writer
//!
//! Appends new versions to the region and reclaims space when it runs out.

use tracing::{debug, error, info};

use crate::config::Config;
use crate::device::StorageDevice;
use crate::error::{Result, WearLogError};

use super::{encode_record, total_size, CursorState};

/// Write path over a region
///
/// Borrows the device and the cursor for the duration of one operation.
pub struct LogWriter<'a, D: StorageDevice + ?Sized> {
    device: &'a mut D,
    config: &'a Config,
    cursor: &'a mut CursorState,
}

impl<'a, D: StorageDevice + ?Sized> LogWriter<'a, D> {
    pub fn new(device: &'a mut D, config: &'a Config, cursor: &'a mut CursorState) -> Self {
        Self {
            device,
            config,
            cursor,
        }
    }

    /// Append `data` as the next version of the item
    ///
    /// Steps:
    /// 1. Validate the payload size
    /// 2. Erase the region if the record would not fit
    /// 3. Write the record byte by byte after the current one
    /// 4. Read it back and compare
    /// 5. Advance the cursor
    ///
    /// On a verification failure the cursor is left as it was before step 3.
    pub fn append(&mut self, data: &[u8]) -> Result<CursorState> {
        let max = self.config.max_data_size();
        if data.is_empty() {
            return Err(WearLogError::InvalidInput);
        }
        if data.len() > max {
            return Err(WearLogError::TooBigItem {
                size: data.len(),
                max,
            });
        }

        let new_total = total_size(data.len()) as u32;
        self.make_room_for(new_total);

        let counter = self.cursor.counter.wrapping_add(1);
        let address = self.cursor.next_address();
        let image = encode_record(self.config, counter, data);

        for (i, &byte) in image.iter().enumerate() {
            self.device.write_byte(address + i as u32, byte);
        }

        if let Err(e) = self.verify(address, &image) {
            error!(address, counter, "record write verification failed: {}", e);
            return Err(e);
        }

        *self.cursor = CursorState {
            counter,
            address,
            total_size: new_total,
        };

        debug!(
            counter,
            address,
            size = data.len(),
            "appended record"
        );

        Ok(*self.cursor)
    }

    /// Erase the region if a `next_record_size`-byte record would overrun it
    ///
    /// Returns whether an erase happened.
    pub fn make_room_for(&mut self, next_record_size: u32) -> bool {
        let needed = self.cursor.next_address() as u64 + next_record_size as u64;
        if needed <= self.config.end() as u64 {
            return false;
        }

        info!(
            discarded_counter = self.cursor.counter,
            "region exhausted, erasing {} bytes",
            self.config.size
        );
        self.erase();
        true
    }

    /// Erase the whole region and reset the cursor to empty
    pub fn erase(&mut self) {
        self.device
            .erase_range(self.config.start, self.config.size, self.config.erased_value);
        *self.cursor = CursorState::empty(self.config.start);
    }

    /// Compare every byte at `address` against `image`
    fn verify(&self, address: u32, image: &[u8]) -> Result<()> {
        for (i, &expected) in image.iter().enumerate() {
            let at = address + i as u32;
            let found = self.device.read_byte(at);
            if found != expected {
                return Err(WearLogError::WriteVerificationFailed {
                    address: at,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}
