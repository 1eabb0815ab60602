//! # WearLog
//!
//! A wear-leveling single-item store for byte-addressable memory with:
//! - Append-only versioning instead of in-place rewrites
//! - CRC-8 protected records
//! - Crash recovery that tolerates a torn final write
//! - Erase-and-restart when the region fills up
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     VersionedStore                           │
//! │              (owns config + device + cursor)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────────┐
//!          │            │                 │
//!          ▼            ▼                 ▼
//!   ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//!   │  LogWriter  │ │  LogReader  │ │ LogRecovery │
//!   │  (append,   │ │  (validate) │ │  (replay)   │
//!   │   erase)    │ │             │ │             │
//!   └──────┬──────┘ └──────┬──────┘ └──────┬──────┘
//!          │               │               │
//!          └───────────────┼───────────────┘
//!                          ▼
//!                  ┌───────────────┐
//!                  │ StorageDevice │
//!                  │ (byte cells)  │
//!                  └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wearlog::{Config, VersionedStore};
//! use wearlog::device::MemoryDevice;
//!
//! let config = Config::default();
//! let device = MemoryDevice::new(config.start, config.size, config.erased_value);
//! let mut store = VersionedStore::open(device, config).unwrap();
//!
//! store.write(&[0x11, 0x22, 0x33]).unwrap();
//! assert_eq!(&store.read().unwrap().data[..], &[0x11, 0x22, 0x33]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod crc;
pub mod device;
pub mod log;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{Result, WearLogError};
pub use log::{CursorState, InitStatus, Item, RecoveryReport};
pub use store::VersionedStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of WearLog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
