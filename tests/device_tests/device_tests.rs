//! Tests for storage devices
//!
//! These tests verify:
//! - Byte read/write at absolute addresses
//! - Erase and coverage checks
//! - File images survive reopening

use wearlog::device::{FileDevice, MemoryDevice, StorageDevice};
use tempfile::TempDir;

// =============================================================================
// Memory Device Tests
// =============================================================================

#[test]
fn test_memory_write_and_read_every_cell() {
    let mut device = MemoryDevice::new(0x310000, 1024, 0xFF);

    for i in 0..1024u32 {
        device.write_byte(0x310000 + i, i as u8);
    }
    for i in 0..1024u32 {
        assert_eq!(device.read_byte(0x310000 + i), i as u8);
    }
}

#[test]
fn test_memory_erase_range() {
    let mut device = MemoryDevice::with_data(0, (0..64).collect());

    device.erase_range(8, 16, 0xFF);

    assert_eq!(device.read_byte(7), 7);
    assert!((8..24).all(|a| device.read_byte(a) == 0xFF));
    assert_eq!(device.read_byte(24), 24);
}

#[test]
fn test_memory_wear_stats_after_erase() {
    let mut device = MemoryDevice::new(0, 32, 0xFF);

    device.erase_range(0, 32, 0xFF);
    device.write_byte(0, 1);

    let stats = device.wear_stats();
    assert_eq!(stats.max, 2);
    assert_eq!(stats.total, 33);
    assert_eq!(stats.cells_touched, 32);
}

#[test]
fn test_device_through_mut_reference() {
    fn stamp<D: StorageDevice>(mut device: D) {
        let base = device.base_address();
        device.write_byte(base + 3, 0x33);
        device.erase_range(base, 2, 0xEE);
    }

    let mut device = MemoryDevice::new(0x40, 16, 0x00);
    stamp(&mut device);

    assert_eq!(device.read_byte(0x43), 0x33);
    assert_eq!(&device.data()[..4], &[0xEE, 0xEE, 0x00, 0x33]);
}

#[test]
fn test_covers() {
    let device = MemoryDevice::new(100, 50, 0xFF);

    assert!(device.covers(100, 50));
    assert!(device.covers(120, 30));
    assert!(!device.covers(99, 10));
    assert!(!device.covers(120, 31));
    assert!(!device.covers(u32::MAX, 2));
}

// =============================================================================
// File Device Tests
// =============================================================================

#[test]
fn test_file_device_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("eeprom.bin");

    {
        let mut device = FileDevice::open(&path, 0x1000, 128, 0xFF).unwrap();
        device.write_byte(0x1000, 0x6B);
        device.erase_range(0x1010, 4, 0x00);
        device.persist().unwrap();
        assert!(!device.is_dirty());
    }

    let device = FileDevice::open(&path, 0x1000, 128, 0xFF).unwrap();
    assert_eq!(device.read_byte(0x1000), 0x6B);
    assert_eq!(device.read_byte(0x1010), 0x00);
    assert_eq!(device.read_byte(0x1014), 0xFF);
    assert_eq!(device.path(), path.as_path());
    assert_eq!(device.memory().data().len(), 128);
}

#[test]
fn test_file_device_unpersisted_writes_are_lost() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eeprom.bin");

    {
        let mut device = FileDevice::open(&path, 0, 64, 0xFF).unwrap();
        device.write_byte(0, 0x01);
    }

    let device = FileDevice::open(&path, 0, 64, 0xFF).unwrap();
    assert_eq!(device.read_byte(0), 0xFF);
}

#[test]
fn test_file_device_interrupted_persist_keeps_previous_image() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eeprom.bin");

    {
        let mut device = FileDevice::open(&path, 0, 64, 0xFF).unwrap();
        device.write_byte(0, 0x6B);
        device.persist().unwrap();

        // A persist cut off mid-write leaves a short temporary file behind
        std::fs::write(device.temp_path(), [0x00; 10]).unwrap();
    }

    let mut device = FileDevice::open(&path, 0, 64, 0xFF).unwrap();
    assert_eq!(device.read_byte(0), 0x6B);
    assert_eq!(std::fs::read(&path).unwrap().len(), 64);

    device.write_byte(1, 0x01);
    device.persist().unwrap();
    assert!(!device.temp_path().exists());

    let device = FileDevice::open(&path, 0, 64, 0xFF).unwrap();
    assert_eq!(device.read_byte(0), 0x6B);
    assert_eq!(device.read_byte(1), 0x01);
}
