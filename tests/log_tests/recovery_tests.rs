//! Tests for Log Recovery
//!
//! These tests verify:
//! - Recovery from a virgin or garbage-filled region
//! - Recovery of the newest record after many appends
//! - Torn writes and flipped checksums at the log tail
//! - Records that claim to run past the region end
//! - Idempotence

use wearlog::device::{MemoryDevice, StorageDevice};
use wearlog::log::{
    encode_record, CursorState, InitStatus, LogRecovery, LogWriter, StopReason,
};
use wearlog::Config;

// =============================================================================
// Helper Functions
// =============================================================================

fn append_all(device: &mut MemoryDevice, config: &Config, payloads: &[&[u8]]) -> CursorState {
    let mut cursor = CursorState::empty(config.start);
    let mut writer = LogWriter::new(device, config, &mut cursor);
    for payload in payloads {
        writer.append(payload).unwrap();
    }
    cursor
}

fn append_all_from(
    device: &mut MemoryDevice,
    config: &Config,
    counter: u16,
    address: u32,
    payloads: &[&[u8]],
) {
    let mut cursor = CursorState { counter, address, total_size: 0 };
    let mut writer = LogWriter::new(device, config, &mut cursor);
    for payload in payloads {
        writer.append(payload).unwrap();
    }
}

fn fresh(config: &Config) -> MemoryDevice {
    MemoryDevice::new(config.start, config.size, config.erased_value)
}

const ITEM: &[u8] = &[0x11, 0x22, 0x33, 0x44, 0x55];
const ITEM10: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

// =============================================================================
// Empty Region Tests
// =============================================================================

#[test]
fn test_recover_virgin_memory() {
    let config = Config::default();
    let device = fresh(&config);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, CursorState::empty(0));
    assert_eq!(report.records_scanned, 0);
    assert_eq!(report.stop_reason, StopReason::NoHeader);
    assert_eq!(report.stopped_at, 0);
    assert_eq!(report.status(), InitStatus::EmptyMemory);
}

#[test]
fn test_recover_garbage_memory() {
    let config = Config::default();
    let pattern: Vec<u8> = (0..1024u32).map(|i| (i & 0xFF) as u8).collect();
    let device = MemoryDevice::with_data(0, pattern);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.status(), InitStatus::EmptyMemory);
    assert_eq!(report.stop_reason, StopReason::NoHeader);
}

#[test]
fn test_recover_fake_header_in_garbage() {
    let config = Config::default();
    let mut pattern: Vec<u8> = (0..1024u32).map(|i| (i & 0xFF) as u8).collect();
    pattern[0] = 0x6B;
    pattern[1] = 0;
    pattern[2] = 10;
    let device = MemoryDevice::with_data(0, pattern);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.status(), InitStatus::EmptyMemory);
    assert_eq!(report.stop_reason, StopReason::ChecksumMismatch);
}

// =============================================================================
// Clean Log Tests
// =============================================================================

#[test]
fn test_recover_single_record() {
    let config = Config::default();
    let mut device = fresh(&config);
    let written = append_all(&mut device, &config, &[ITEM]);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, written);
    assert_eq!(report.records_scanned, 1);
    assert_eq!(report.stopped_at, 10);
    assert_eq!(report.status(), InitStatus::Recovered);
}

#[test]
fn test_recover_mixed_sizes() {
    let config = Config::default();
    let mut device = fresh(&config);
    let written = append_all(&mut device, &config, &[b"a", b"bbbbbbbb", b"cc", b"ddddd"]);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, written);
    assert_eq!(report.cursor, CursorState { counter: 4, address: 26, total_size: 10 });
    assert_eq!(report.records_scanned, 4);
}

#[test]
fn test_recover_full_region() {
    // 100-byte region holds exactly ten 10-byte records
    let config = Config::builder().size(100).build();
    let mut device = fresh(&config);
    let written = append_all(&mut device, &config, &[ITEM; 10]);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, written);
    assert_eq!(report.stop_reason, StopReason::RegionEnd);
    assert_eq!(report.stopped_at, 100);
}

#[test]
fn test_recover_non_zero_start() {
    let config = Config::builder().start(0x310000).size(1024).build();
    let mut device = MemoryDevice::new(0x310000, 1024, 0xFF);
    append_all(&mut device, &config, &[ITEM, ITEM]);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, CursorState { counter: 2, address: 0x31000A, total_size: 10 });
}

#[test]
fn test_recover_is_idempotent() {
    let config = Config::default();
    let mut device = fresh(&config);
    append_all(&mut device, &config, &[ITEM, b"xyz", ITEM]);

    let first = LogRecovery::recover(&device, &config);
    let second = LogRecovery::recover(&device, &config);

    assert_eq!(first, second);
}

// =============================================================================
// Damaged Tail Tests
// =============================================================================

#[test]
fn test_recover_flipped_crc_keeps_previous() {
    let config = Config::default();
    let mut device = fresh(&config);
    append_all(&mut device, &config, &[ITEM, ITEM, ITEM]);
    device.data_mut()[29] ^= 0xFF;

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, CursorState { counter: 2, address: 10, total_size: 10 });
    assert_eq!(report.stop_reason, StopReason::ChecksumMismatch);
    assert_eq!(report.stopped_at, 20);
}

#[test]
fn test_recover_torn_write() {
    let config = Config::default();
    let mut device = fresh(&config);
    append_all(&mut device, &config, &[ITEM, ITEM]);

    // Power lost after the first 7 bytes of record 3
    let image = encode_record(&config, 3, ITEM);
    for (i, &b) in image[..7].iter().enumerate() {
        device.write_byte(20 + i as u32, b);
    }

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, CursorState { counter: 2, address: 10, total_size: 10 });
    assert_eq!(report.stop_reason, StopReason::ChecksumMismatch);
}

#[test]
fn test_recover_torn_header_only() {
    let config = Config::default();
    let mut device = fresh(&config);
    append_all(&mut device, &config, &[ITEM]);
    device.write_byte(10, 0x6B);

    // Counter and size bytes still erased: 0xFFFF / 255-byte payload
    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, CursorState { counter: 1, address: 0, total_size: 10 });
    assert_ne!(report.stop_reason, StopReason::NoHeader);
}

#[test]
fn test_recover_record_past_region_end() {
    let config = Config::builder().size(100).build();
    let mut device = fresh(&config);
    append_all(&mut device, &config, &[ITEM; 9]);

    // Header at 90 claiming a 10-byte payload (15 bytes total, 10 available)
    device.write_byte(90, 0x6B);
    device.write_byte(91, 0x00);
    device.write_byte(92, 0x0A);
    device.write_byte(93, 10);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor.counter, 9);
    assert_eq!(report.stop_reason, StopReason::Truncated);
    assert_eq!(report.stopped_at, 90);
}

#[test]
fn test_recover_header_in_last_bytes() {
    let config = Config::builder().size(100).build();
    let mut device = fresh(&config);
    append_all(&mut device, &config, &[ITEM10; 6]);

    // 6 records of 15 bytes end at 90; write one 7-byte record, then a stray
    // header two bytes before the end of the region
    append_all_from(&mut device, &config, 6, 90, &[&[1, 2]]);
    device.write_byte(97, 0x6B);

    let report = LogRecovery::recover(&device, &config);

    assert_eq!(report.cursor, CursorState { counter: 7, address: 90, total_size: 7 });
    assert_eq!(report.stop_reason, StopReason::Truncated);
    assert_eq!(report.stopped_at, 97);
}
