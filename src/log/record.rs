//! Record codec
//!
//! Byte-exact framing of a single log record and its CRC-8.

use bytes::Bytes;

use crate::config::Config;
use crate::crc::{Crc8, Crc8Digest};
use crate::device::StorageDevice;

/// Header magic (1) + counter (2) + data size (1)
pub const PAYLOAD_OFFSET: usize = 4;

/// Trailing checksum byte
pub const CRC_SIZE: usize = 1;

/// Bytes a record occupies besides its payload
pub const RECORD_OVERHEAD: usize = PAYLOAD_OFFSET + CRC_SIZE;

/// Device footprint of a record carrying `data_size` payload bytes
pub fn total_size(data_size: usize) -> usize {
    data_size + RECORD_OVERHEAD
}

/// Fixed-size fields at the front of every record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub magic: u8,
    pub counter: u16,
    pub data_size: u8,
}

impl RecordHeader {
    /// Wire order: magic, counter high, counter low, data size
    pub fn to_bytes(&self) -> [u8; PAYLOAD_OFFSET] {
        let [hi, lo] = self.counter.to_be_bytes();
        [self.magic, hi, lo, self.data_size]
    }

    pub fn from_bytes(bytes: [u8; PAYLOAD_OFFSET]) -> Self {
        Self {
            magic: bytes[0],
            counter: u16::from_be_bytes([bytes[1], bytes[2]]),
            data_size: bytes[3],
        }
    }

    /// Parse the header stored at `address`
    pub fn read_from<D: StorageDevice + ?Sized>(device: &D, address: u32) -> Self {
        let mut bytes = [0u8; PAYLOAD_OFFSET];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = device.read_byte(address + i as u32);
        }
        Self::from_bytes(bytes)
    }

    pub fn total_size(&self) -> usize {
        total_size(self.data_size as usize)
    }

    /// Digest with the header bytes already folded in
    fn digest(&self, crc: &Crc8) -> Crc8Digest {
        let mut digest = crc.digest();
        digest.update(&self.to_bytes());
        digest
    }
}

/// The current version of the stored item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Version counter of the record the item was read from
    pub counter: u16,
    pub data: Bytes,
}

/// CRC of a record whose payload is in memory
pub fn record_crc(crc: &Crc8, header: &RecordHeader, data: &[u8]) -> u8 {
    let mut digest = header.digest(crc);
    digest.update(data);
    digest.finalize()
}

/// CRC of a record whose payload is read live from `payload_address`
///
/// Yields the same value as [`record_crc`] for identical content without
/// copying the payload out of the device.
pub fn device_crc<D: StorageDevice + ?Sized>(
    crc: &Crc8,
    header: &RecordHeader,
    device: &D,
    payload_address: u32,
) -> u8 {
    let mut digest = header.digest(crc);
    for i in 0..header.data_size as u32 {
        digest.update_byte(device.read_byte(payload_address + i));
    }
    digest.finalize()
}

/// Device image of a record: header, payload, CRC
///
/// `data` must not exceed 255 bytes; callers check it against
/// [`Config::max_data_size`] first.
pub fn encode_record(config: &Config, counter: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(data.len() <= u8::MAX as usize);

    let header = RecordHeader {
        magic: config.header_magic,
        counter,
        data_size: data.len() as u8,
    };

    let mut image = Vec::with_capacity(total_size(data.len()));
    image.extend_from_slice(&header.to_bytes());
    image.extend_from_slice(data);
    image.push(record_crc(&config.crc, &header, data));
    image
}
