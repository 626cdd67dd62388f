//! Configuration for the Stockroom CLI.
//!
//! Locates the inventory file and reads tunables from the environment.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.stockroom/
//! └── inventory.json    # the catalog
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DATA_FILE`: Path of the inventory file (also `--data-file`)
//! - `STOCKROOM_HOME`: Override the base directory
//! - `STOCKROOM_LOW_STOCK_THRESHOLD`: Default threshold for `low-stock`

use std::path::PathBuf;

use stockroom_inventory::DEFAULT_LOW_STOCK_THRESHOLD;
use tracing::warn;

/// Environment variable for the inventory file path.
pub const DATA_FILE_ENV: &str = "STOCKROOM_DATA_FILE";

/// Environment variable for a custom base directory.
pub const HOME_ENV: &str = "STOCKROOM_HOME";

/// Environment variable for the low-stock threshold.
pub const LOW_STOCK_THRESHOLD_ENV: &str = "STOCKROOM_LOW_STOCK_THRESHOLD";

/// Default base directory name under home.
const DEFAULT_HOME_DIR: &str = ".stockroom";

/// File name of the catalog inside the base directory.
const DATA_FILE_NAME: &str = "inventory.json";

/// Get the Stockroom base directory.
///
/// The base directory is determined by:
/// 1. `STOCKROOM_HOME` environment variable if set
/// 2. `~/.stockroom` if home directory is available
/// 3. `.stockroom` in current directory as fallback
pub fn home_dir() -> PathBuf {
    std::env::var(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_HOME_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR))
        })
}

/// Get the default inventory file path.
pub fn default_data_file() -> PathBuf {
    home_dir().join(DATA_FILE_NAME)
}

/// Get the low-stock threshold.
///
/// Reads `STOCKROOM_LOW_STOCK_THRESHOLD`, falling back to the default of 5.
pub fn low_stock_threshold() -> u32 {
    parse_threshold(std::env::var(LOW_STOCK_THRESHOLD_ENV).ok().as_deref())
}

fn parse_threshold(raw: Option<&str>) -> u32 {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_LOW_STOCK_THRESHOLD,
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(
                value = %value,
                default = DEFAULT_LOW_STOCK_THRESHOLD,
                "Invalid {}, using default",
                LOW_STOCK_THRESHOLD_ENV
            );
            DEFAULT_LOW_STOCK_THRESHOLD
        }),
    }
}
