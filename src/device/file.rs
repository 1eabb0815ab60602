//! File-backed storage device.
//!
//! The whole memory image is held in RAM and written back with
//! [`FileDevice::persist`]. Byte operations stay infallible; only loading and
//! persisting touch the file system.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, WearLogError};

use super::{MemoryDevice, StorageDevice};

/// A memory image stored in a file
#[derive(Debug)]
pub struct FileDevice {
    path: PathBuf,
    memory: MemoryDevice,
    dirty: bool,
}

impl FileDevice {
    /// Open the image at `path`, creating it if it doesn't exist
    ///
    /// A new image is filled with `initial`. An existing image must be exactly
    /// `capacity` bytes long.
    pub fn open(path: &Path, base: u32, capacity: u32, initial: u8) -> Result<Self> {
        let memory = if path.exists() {
            let data = fs::read(path)?;
            if data.len() != capacity as usize {
                return Err(WearLogError::Config(format!(
                    "image {} is {} bytes, expected {}",
                    path.display(),
                    data.len(),
                    capacity
                )));
            }
            MemoryDevice::with_data(base, data)
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            MemoryDevice::new(base, capacity, initial)
        };

        let mut device = Self {
            path: path.to_path_buf(),
            memory,
            dirty: false,
        };

        if !path.exists() {
            device.dirty = true;
            device.persist()?;
        }

        Ok(device)
    }

    /// Write the image back to disk if anything changed
    ///
    /// Write-then-rename, so an interrupted persist leaves the previous image:
    /// 1. Write the image to a sibling temporary file
    /// 2. Sync the temporary file
    /// 3. Rename it over the image
    pub fn persist(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let temp_path = self.temp_path();

        let mut file = File::create(&temp_path)?;
        file.write_all(self.memory.data())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;

        self.dirty = false;
        Ok(())
    }

    /// `<image>.tmp` next to the image
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Path of the underlying image file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory copy of the image
    pub fn memory(&self) -> &MemoryDevice {
        &self.memory
    }

    /// Whether there are writes not yet persisted
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl StorageDevice for FileDevice {
    fn read_byte(&self, address: u32) -> u8 {
        self.memory.read_byte(address)
    }

    fn write_byte(&mut self, address: u32, value: u8) {
        self.memory.write_byte(address, value);
        self.dirty = true;
    }

    fn base_address(&self) -> u32 {
        self.memory.base_address()
    }

    fn capacity(&self) -> u32 {
        self.memory.capacity()
    }

    fn erase_range(&mut self, start: u32, len: u32, value: u8) {
        self.memory.erase_range(start, len, value);
        self.dirty = true;
    }
}
