//! Storage Device Module
//!
//! The raw byte-addressable memory underneath a store.
//!
//! ## Responsibilities
//! - Single-byte reads and writes at absolute addresses
//! - Report the address window the device covers
//!
//! Devices are plain byte cells. They know nothing about records, counters
//! or checksums, and they have no error channel: a device either covers an
//! address or the store refuses to open on it.
//!
//! ## Implementors
//! - [`MemoryDevice`] - RAM-backed emulator with per-cell wear counters
//! - [`FileDevice`] - memory image loaded from and persisted to a file

mod file;
mod memory;

pub use file::FileDevice;
pub use memory::{MemoryDevice, WearStats};

/// A byte-addressable persistent memory
pub trait StorageDevice {
    /// Read the byte stored at `address`
    fn read_byte(&self, address: u32) -> u8;

    /// Store `value` at `address`
    fn write_byte(&mut self, address: u32, value: u8);

    /// First address covered by the device
    fn base_address(&self) -> u32;

    /// Number of addressable bytes
    fn capacity(&self) -> u32;

    /// Overwrite `len` bytes starting at `start` with `value`
    ///
    /// Devices with a native bulk erase should override this.
    fn erase_range(&mut self, start: u32, len: u32, value: u8) {
        for address in start..start + len {
            self.write_byte(address, value);
        }
    }

    /// Whether `[start, start + len)` lies entirely on the device
    fn covers(&self, start: u32, len: u32) -> bool {
        let base = self.base_address() as u64;
        let end = base + self.capacity() as u64;
        let start = start as u64;
        start >= base && start + len as u64 <= end
    }
}

impl<D: StorageDevice + ?Sized> StorageDevice for &mut D {
    fn read_byte(&self, address: u32) -> u8 {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: u32, value: u8) {
        (**self).write_byte(address, value)
    }

    fn base_address(&self) -> u32 {
        (**self).base_address()
    }

    fn capacity(&self) -> u32 {
        (**self).capacity()
    }

    fn erase_range(&mut self, start: u32, len: u32, value: u8) {
        (**self).erase_range(start, len, value)
    }
}
