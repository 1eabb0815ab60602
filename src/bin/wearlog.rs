//! WearLog CLI
//!
//! Inspect and update a wear-leveled item stored in an EEPROM image file.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use wearlog::device::{FileDevice, StorageDevice};
use wearlog::{Config, VersionedStore};

/// WearLog CLI
#[derive(Parser, Debug)]
#[command(name = "wearlog")]
#[command(about = "Wear-leveled single-item store over an EEPROM image")]
#[command(version)]
struct Args {
    /// Image file (created if missing)
    #[arg(short, long, default_value = "./eeprom.bin")]
    image: PathBuf,

    /// Region start address
    #[arg(long, default_value = "0", value_parser = parse_address)]
    start: u32,

    /// Region size in bytes
    #[arg(short, long, default_value = "1024")]
    size: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a new version of the item
    Write {
        /// Item contents (UTF-8 text, or hex with --hex)
        value: String,

        /// Interpret the value as hex bytes
        #[arg(long)]
        hex: bool,
    },

    /// Print the current item
    Read {
        /// Expected payload size; the stored size is used when omitted
        #[arg(long)]
        size: Option<usize>,

        /// Print the payload as hex
        #[arg(long)]
        hex: bool,
    },

    /// Show cursor, recovery and region details
    Info {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Erase the whole region
    Erase,

    /// Run the destructive device self-test
    SelfTest,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wearlog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::builder().start(args.start).size(args.size).build();

    tracing::debug!("Image: {}", args.image.display());

    let device = FileDevice::open(&args.image, config.start, config.size, config.erased_value)?;
    let mut store = VersionedStore::open(device, config)?;

    match args.command {
        Commands::Write { value, hex } => {
            let data = if hex {
                parse_hex(&value)?
            } else {
                value.into_bytes()
            };
            let cursor = store.write(&data)?;
            println!("version {} at 0x{:08X}", cursor.counter, cursor.address);
        }
        Commands::Read { size, hex } => {
            let (counter, data) = match size {
                Some(size) => (store.cursor().counter, store.read_exact(size)?),
                None => {
                    let item = store.read()?;
                    (item.counter, item.data)
                }
            };
            let rendered = if hex {
                to_hex(&data)
            } else {
                String::from_utf8_lossy(&data).into_owned()
            };
            println!("version {}: {}", counter, rendered);
        }
        Commands::Info { json } => {
            let report = store.last_recovery();
            if json {
                let info = serde_json::json!({
                    "config": store.config(),
                    "max_data_size": store.max_data_size(),
                    "free_space": store.free_space(),
                    "recovery": report,
                    "status": report.status(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let cursor = store.cursor();
                println!("status:        {:?}", report.status());
                println!("version:       {}", cursor.counter);
                println!("address:       0x{:08X}", cursor.address);
                println!("record size:   {}", cursor.total_size);
                println!("records:       {}", report.records_scanned);
                println!("scan stopped:  {:?} at 0x{:08X}", report.stop_reason, report.stopped_at);
                println!("max item size: {}", store.max_data_size());
                println!("free space:    {}", store.free_space());
            }
        }
        Commands::Erase => {
            store.erase();
            println!("erased {} bytes", store.config().size);
        }
        Commands::SelfTest => {
            store.self_test()?;
            println!(
                "self-test passed ({} bytes from 0x{:08X})",
                store.config().size,
                store.device().base_address()
            );
        }
    }

    store.device_mut().persist()?;
    Ok(())
}

fn parse_address(s: &str) -> Result<u32, String> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => s.parse().map_err(|e: std::num::ParseIntError| e.to_string()),
    }
}

fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in '{}'", s));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let byte: String = pair.iter().collect();
            u8::from_str_radix(&byte, 16).map_err(|_| format!("invalid hex byte '{}'", byte))
        })
        .collect()
}

fn to_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
