//! Store Module
//!
//! The versioned store that coordinates all components.
//!
//! ## Responsibilities
//! - Validate the configuration against the device on open
//! - Run crash recovery on startup
//! - Route writes through the write path and reads through the read path
//! - Own the cursor state between calls

use bytes::Bytes;
use tracing::info;

use crate::config::Config;
use crate::device::StorageDevice;
use crate::error::{Result, WearLogError};
use crate::log::{CursorState, Item, LogReader, LogRecovery, LogWriter, RecoveryReport};

/// Patterns written to every cell by [`VersionedStore::self_test`]
const SELF_TEST_PATTERNS: [u8; 2] = [0x55, 0xAA];

/// A wear-leveled single-item store over one device region
///
/// ## Execution Model: Single Writer, Run to Completion
///
/// - Mutating operations (`write`, `erase`, `recover`, `self_test`) take
///   `&mut self`, so no two can overlap on the same store.
/// - Reads take `&self` and never change the cursor.
/// - Two stores must not be opened over overlapping regions of one device.
///
/// A reset in the middle of `write` can leave a torn record at the log tail;
/// the next `open` ignores it and keeps the previous version current.
pub struct VersionedStore<D: StorageDevice> {
    /// Region and record configuration
    config: Config,

    /// Backing memory
    device: D,

    /// Newest record (rebuilt by recovery)
    cursor: CursorState,

    /// Outcome of the most recent recovery scan
    last_recovery: RecoveryReport,
}

impl<D: StorageDevice> VersionedStore<D> {
    /// Open a store over `device`
    ///
    /// On startup:
    /// 1. Validate the configuration
    /// 2. Check that the region lies on the device
    /// 3. Replay the region to find the current record
    pub fn open(device: D, config: Config) -> Result<Self> {
        config.validate()?;

        if !device.covers(config.start, config.size) {
            return Err(WearLogError::Config(format!(
                "region 0x{:08X}+{} is outside the device (0x{:08X}+{})",
                config.start,
                config.size,
                device.base_address(),
                device.capacity()
            )));
        }

        let report = LogRecovery::recover(&device, &config);

        info!(
            status = ?report.status(),
            counter = report.cursor.counter,
            address = report.cursor.address,
            records = report.records_scanned,
            "store opened"
        );

        Ok(Self {
            cursor: report.cursor,
            last_recovery: report,
            config,
            device,
        })
    }

    /// Store `data` as the new current version
    ///
    /// Returns the cursor of the record just written.
    pub fn write(&mut self, data: &[u8]) -> Result<CursorState> {
        LogWriter::new(&mut self.device, &self.config, &mut self.cursor).append(data)
    }

    /// Read the current item
    pub fn read(&self) -> Result<Item> {
        LogReader::new(&self.device, &self.config, &self.cursor).read()
    }

    /// Read the current item when its size is known in advance
    pub fn read_exact(&self, expected_size: usize) -> Result<Bytes> {
        LogReader::new(&self.device, &self.config, &self.cursor).read_exact(expected_size)
    }

    /// Rescan the region and replace the cursor
    pub fn recover(&mut self) -> RecoveryReport {
        let report = LogRecovery::recover(&self.device, &self.config);
        self.cursor = report.cursor;
        self.last_recovery = report;
        report
    }

    /// Erase the whole region, discarding the current item
    pub fn erase(&mut self) {
        LogWriter::new(&mut self.device, &self.config, &mut self.cursor).erase();
        info!(start = self.config.start, size = self.config.size, "region erased");
    }

    /// Check that every cell of the region holds what is written to it
    ///
    /// Destructive: the region is erased afterwards, and also on failure.
    pub fn self_test(&mut self) -> Result<()> {
        let result = self.run_patterns();
        self.erase();
        result
    }

    fn run_patterns(&mut self) -> Result<()> {
        let (start, end) = (self.config.start, self.config.end());

        for &pattern in &SELF_TEST_PATTERNS {
            for address in start..end {
                self.device.write_byte(address, pattern);
            }
            for address in start..end {
                let found = self.device.read_byte(address);
                if found != pattern {
                    return Err(WearLogError::SelfTestFailed {
                        address,
                        expected: pattern,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn max_data_size(&self) -> usize {
        self.config.max_data_size()
    }

    /// Bytes left before the next erase
    pub fn free_space(&self) -> u32 {
        self.config.end() - self.cursor.next_address()
    }

    pub fn last_recovery(&self) -> &RecoveryReport {
        &self.last_recovery
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Direct device access (for fault injection in tests)
    ///
    /// Changes made here are not reflected in the cursor until
    /// [`VersionedStore::recover`] runs.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Give the device back, e.g. to simulate a restart
    pub fn into_device(self) -> D {
        self.device
    }
}
