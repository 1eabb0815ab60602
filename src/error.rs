//! Error types for WearLog
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using WearLogError
pub type Result<T> = std::result::Result<T, WearLogError>;

/// Unified error type for WearLog operations
#[derive(Debug, Error)]
pub enum WearLogError {
    // -------------------------------------------------------------------------
    // Write Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: item must contain at least one byte")]
    InvalidInput,

    #[error("Item too big: {size} bytes (max {max})")]
    TooBigItem { size: usize, max: usize },

    #[error("Write verification failed at 0x{address:08X}: expected 0x{expected:02X}, found 0x{found:02X}")]
    WriteVerificationFailed { address: u32, expected: u8, found: u8 },

    // -------------------------------------------------------------------------
    // Read Errors
    // -------------------------------------------------------------------------
    #[error("Checksum mismatch for record at 0x{address:08X}: stored 0x{stored:02X}, computed 0x{computed:02X}")]
    ChecksumMismatch { address: u32, stored: u8, computed: u8 },

    #[error("Requested read size too large: {size} bytes (max {max})")]
    SizeTooLarge { size: usize, max: usize },

    #[error("Store is empty")]
    EmptyStore,

    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("Device self-test failed at 0x{address:08X}: expected 0x{expected:02X}, found 0x{found:02X}")]
    SelfTestFailed { address: u32, expected: u8, found: u8 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
