//! In-memory storage device for testing and emulation.

use super::StorageDevice;

/// RAM-backed EEPROM emulator.
///
/// Every cell starts at the initial value passed to [`MemoryDevice::new`].
/// The device counts physical writes per cell so wear can be inspected.
///
/// # Example
///
/// ```rust
/// use wearlog::device::{MemoryDevice, StorageDevice};
///
/// let mut device = MemoryDevice::new(0x310000, 1024, 0xFF);
/// device.write_byte(0x310004, 0x42);
/// assert_eq!(device.read_byte(0x310004), 0x42);
/// assert_eq!(device.read_byte(0x310005), 0xFF);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    base: u32,
    cells: Vec<u8>,
    writes: Vec<u64>,
}

/// Summary of per-cell write counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WearStats {
    /// Highest write count of any single cell
    pub max: u64,
    /// Writes across all cells
    pub total: u64,
    /// Cells written at least once
    pub cells_touched: usize,
}

impl MemoryDevice {
    /// Create a device of `capacity` bytes at `base`, filled with `initial`
    pub fn new(base: u32, capacity: u32, initial: u8) -> Self {
        Self {
            base,
            cells: vec![initial; capacity as usize],
            writes: vec![0; capacity as usize],
        }
    }

    /// Create a device from an existing memory image
    ///
    /// Useful for testing recovery scenarios.
    pub fn with_data(base: u32, data: Vec<u8>) -> Self {
        let writes = vec![0; data.len()];
        Self {
            base,
            cells: data,
            writes,
        }
    }

    /// Raw contents of the device
    pub fn data(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable raw contents (bypasses wear accounting)
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Write count of the cell at `address`
    pub fn write_count(&self, address: u32) -> u64 {
        self.writes[self.index(address)]
    }

    pub fn wear_stats(&self) -> WearStats {
        WearStats {
            max: self.writes.iter().copied().max().unwrap_or(0),
            total: self.writes.iter().sum(),
            cells_touched: self.writes.iter().filter(|&&n| n > 0).count(),
        }
    }

    /// Forget all write counts
    pub fn reset_wear(&mut self) {
        self.writes.iter_mut().for_each(|n| *n = 0);
    }

    fn index(&self, address: u32) -> usize {
        debug_assert!(
            self.covers(address, 1),
            "address 0x{:08X} outside device",
            address
        );
        (address - self.base) as usize
    }
}

impl StorageDevice for MemoryDevice {
    fn read_byte(&self, address: u32) -> u8 {
        self.cells[self.index(address)]
    }

    fn write_byte(&mut self, address: u32, value: u8) {
        let idx = self.index(address);
        self.cells[idx] = value;
        self.writes[idx] += 1;
    }

    fn base_address(&self) -> u32 {
        self.base
    }

    fn capacity(&self) -> u32 {
        self.cells.len() as u32
    }
}
