//! CRC-8 checksum
//!
//! Bit-serial, MSB-first CRC-8 with configurable polynomial, initial remainder
//! and final XOR mask. Records are short (at most 260 bytes), so no lookup
//! table is kept.

use serde::{Deserialize, Serialize};

/// Parameters of an 8-bit CRC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crc8 {
    pub polynomial: u8,
    pub init: u8,
    pub xor_out: u8,
}

impl Default for Crc8 {
    fn default() -> Self {
        Self {
            polynomial: 0xE0,
            init: 0xF1,
            xor_out: 0xAB,
        }
    }
}

impl Crc8 {
    /// Compute the checksum of a byte slice
    pub fn checksum(&self, bytes: &[u8]) -> u8 {
        let mut digest = self.digest();
        digest.update(bytes);
        digest.finalize()
    }

    /// Start an incremental computation
    pub fn digest(&self) -> Crc8Digest {
        Crc8Digest {
            params: *self,
            remainder: self.init,
        }
    }
}

/// Running CRC-8 state
///
/// Used when the covered bytes are not contiguous in memory, e.g. a record
/// header assembled from fields followed by a payload read off the device.
#[derive(Debug, Clone, Copy)]
pub struct Crc8Digest {
    params: Crc8,
    remainder: u8,
}

impl Crc8Digest {
    /// Fold one byte into the remainder
    pub fn update_byte(&mut self, byte: u8) {
        self.remainder ^= byte;
        for _ in 0..8 {
            if self.remainder & 0x80 != 0 {
                self.remainder = (self.remainder << 1) ^ self.params.polynomial;
            } else {
                self.remainder <<= 1;
            }
        }
    }

    /// Fold a slice of bytes into the remainder
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.update_byte(byte);
        }
    }

    /// Apply the final XOR mask
    pub fn finalize(self) -> u8 {
        self.remainder ^ self.params.xor_out
    }
}
