//! Configuration for WearLog
//!
//! Centralized configuration with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::crc::Crc8;
use crate::error::{Result, WearLogError};
use crate::log::RECORD_OVERHEAD;

/// Smallest region the store accepts (exclusive)
pub const MIN_REGION_SIZE: u32 = 20;

/// Default ceiling for the derived max payload size
pub const DEFAULT_MAX_DATA_SIZE: usize = 128;

/// Hard ceiling: the on-device size field is one byte
pub const MAX_DATA_SIZE_LIMIT: usize = u8::MAX as usize;

/// Main configuration for a WearLog region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Region Configuration
    // -------------------------------------------------------------------------
    /// First device address of the region
    pub start: u32,

    /// Region length in bytes
    /// Layout:
    ///   [start, start + size)
    ///     ├── record 1 .. record N   (append log)
    ///     └── erased bytes           (erased_value)
    pub size: u32,

    /// Value of an erased cell
    pub erased_value: u8,

    // -------------------------------------------------------------------------
    // Record Configuration
    // -------------------------------------------------------------------------
    /// Magic byte marking the start of a record
    pub header_magic: u8,

    /// Checksum parameters
    pub crc: Crc8,

    /// Explicit payload limit; `None` derives `min(128, size / 10)`
    pub max_data_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start: 0,
            size: 1024,
            erased_value: 0xFF,
            header_magic: 0x6B,
            crc: Crc8::default(),
            max_data_size: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// One past the last address of the region
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.size)
    }

    /// Largest payload a single record may carry
    pub fn max_data_size(&self) -> usize {
        match self.max_data_size {
            Some(max) => max.min(MAX_DATA_SIZE_LIMIT),
            None => DEFAULT_MAX_DATA_SIZE.min(self.size as usize / 10),
        }
    }

    /// Check that the region can hold records at all
    pub fn validate(&self) -> Result<()> {
        if self.size <= MIN_REGION_SIZE {
            return Err(WearLogError::Config(format!(
                "region size {} too small (must exceed {} bytes)",
                self.size, MIN_REGION_SIZE
            )));
        }

        if self.start.checked_add(self.size).is_none() {
            return Err(WearLogError::Config(format!(
                "region 0x{:08X}+{} overflows the address space",
                self.start, self.size
            )));
        }

        if let Some(max) = self.max_data_size {
            if max > MAX_DATA_SIZE_LIMIT {
                return Err(WearLogError::Config(format!(
                    "max data size {} exceeds {}",
                    max, MAX_DATA_SIZE_LIMIT
                )));
            }
        }

        let max = self.max_data_size();
        if max == 0 {
            return Err(WearLogError::Config("max data size must be at least 1".to_string()));
        }

        if max + RECORD_OVERHEAD > self.size as usize {
            return Err(WearLogError::Config(format!(
                "a {}-byte record does not fit in a {}-byte region",
                max + RECORD_OVERHEAD,
                self.size
            )));
        }

        if self.header_magic == self.erased_value {
            return Err(WearLogError::Config(format!(
                "header magic 0x{:02X} equals the erased value",
                self.header_magic
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the first address of the region
    pub fn start(mut self, address: u32) -> Self {
        self.config.start = address;
        self
    }

    /// Set the region length (in bytes)
    pub fn size(mut self, size: u32) -> Self {
        self.config.size = size;
        self
    }

    /// Set the value the device reads back from erased cells
    pub fn erased_value(mut self, value: u8) -> Self {
        self.config.erased_value = value;
        self
    }

    /// Set the record header magic byte
    pub fn header_magic(mut self, magic: u8) -> Self {
        self.config.header_magic = magic;
        self
    }

    /// Set the checksum parameters
    pub fn crc(mut self, crc: Crc8) -> Self {
        self.config.crc = crc;
        self
    }

    /// Override the derived payload limit
    pub fn max_data_size(mut self, max: usize) -> Self {
        self.config.max_data_size = Some(max);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
