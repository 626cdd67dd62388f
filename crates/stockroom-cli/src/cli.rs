//! Command-line interface definition using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;
use stockroom_inventory::ProductSort;
use stockroom_models::{Dimensions, ProductType};

use crate::config;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.1.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Stockroom - inventory records for physical, digital and service products
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the inventory file
    #[arg(short = 'f', long, env = config::DATA_FILE_ENV, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new product
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// Show all details of a product
    Show {
        /// Product ID
        id: String,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// List products
    List {
        /// Only products in this category (exact match)
        #[arg(short, long)]
        category: Option<String>,

        /// Only products of this type
        #[arg(short = 't', long = "type")]
        product_type: Option<ProductTypeArg>,

        /// Sort order
        #[arg(short, long, default_value = "unsorted")]
        sort: SortArg,

        /// Output format (table, json, brief)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Search products by name or category (case-insensitive substring)
    Search {
        /// Text to look for
        #[arg(required = true)]
        query: String,

        /// Field to search
        #[arg(short, long, default_value = "name")]
        by: SearchField,

        /// Output format (table, json, brief)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// List products at or below a stock threshold
    LowStock {
        /// Threshold (default: STOCKROOM_LOW_STOCK_THRESHOLD or 5)
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Output format (table, json, brief)
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Update product fields (all or nothing)
    Update {
        /// Product ID
        id: String,

        /// Field assignment, e.g. --set price=12.5 --set name=Gizmo.
        /// Values are parsed as JSON when possible, otherwise taken as text.
        /// Text fields such as name keep numbers and booleans literally.
        #[arg(
            long = "set",
            value_name = "FIELD=VALUE",
            required = true,
            value_parser = parse_assignment,
            allow_hyphen_values = true
        )]
        assignments: Vec<(String, Value)>,
    },

    /// Adjust stock levels
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },

    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },

    /// Show catalog totals
    Summary,

    /// List distinct categories
    Categories,

    /// Write the catalog to another file
    Export {
        /// Destination file
        path: PathBuf,
    },

    /// Replace the catalog with the contents of another file
    Import {
        /// Source file
        path: PathBuf,
    },

    /// Delete every product
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Fields shared by every product type.
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Product name
    #[arg(short, long)]
    pub name: String,

    /// Unit price
    #[arg(short, long, allow_negative_numbers = true)]
    pub price: f64,

    /// Quantity on hand
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub quantity: i64,

    /// Category
    #[arg(short, long)]
    pub category: String,
}

#[derive(Subcommand, Debug)]
pub enum AddKind {
    /// Tangible product with weight and dimensions
    Physical {
        #[command(flatten)]
        base: BaseArgs,

        /// Weight in kg
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        weight: f64,

        /// Dimensions in cm as LENGTHxWIDTHxHEIGHT
        #[arg(short, long, value_parser = parse_dimensions, allow_hyphen_values = true)]
        dimensions: Option<Dimensions>,
    },

    /// Downloadable product
    Digital {
        #[command(flatten)]
        base: BaseArgs,

        /// File size in MB
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        file_size: f64,

        /// Download URL
        #[arg(long, default_value = "")]
        download_link: String,
    },

    /// Service sold by duration
    Service {
        #[command(flatten)]
        base: BaseArgs,

        /// Duration in minutes
        #[arg(short, long, default_value_t = 0)]
        duration: u32,

        /// Kind of service
        #[arg(long, default_value = "")]
        service_type: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum StockAction {
    /// Add units to a product
    Add {
        /// Product ID
        id: String,
        /// Units to add
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Remove units from a product
    Remove {
        /// Product ID
        id: String,
        /// Units to remove
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

/// Product type selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProductTypeArg {
    Physical,
    Digital,
    Service,
}

impl From<ProductTypeArg> for ProductType {
    fn from(arg: ProductTypeArg) -> Self {
        match arg {
            ProductTypeArg::Physical => ProductType::Physical,
            ProductTypeArg::Digital => ProductType::Digital,
            ProductTypeArg::Service => ProductType::Service,
        }
    }
}

/// Sort order for listings
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SortArg {
    #[default]
    Unsorted,
    Name,
    NameDesc,
    Price,
    PriceDesc,
    Quantity,
    QuantityDesc,
}

impl From<SortArg> for ProductSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Unsorted => ProductSort::Unsorted,
            SortArg::Name => ProductSort::NameAsc,
            SortArg::NameDesc => ProductSort::NameDesc,
            SortArg::Price => ProductSort::PriceAsc,
            SortArg::PriceDesc => ProductSort::PriceDesc,
            SortArg::Quantity => ProductSort::QuantityAsc,
            SortArg::QuantityDesc => ProductSort::QuantityDesc,
        }
    }
}

/// Field matched by `search`
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SearchField {
    #[default]
    Name,
    Category,
}

/// Parses `FIELD=VALUE`, reading VALUE as JSON and falling back to a string.
fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}

/// Parses `LxWxH` (also accepts `×` as separator).
fn parse_dimensions(raw: &str) -> Result<Dimensions, String> {
    let sides = raw
        .split(['x', 'X', '×'])
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid dimension in '{}': {}", raw, e))?;

    match sides.as_slice() {
        [length, width, height] => Ok(Dimensions::new(*length, *width, *height)),
        _ => Err(format!("expected LENGTHxWIDTHxHEIGHT, got '{}'", raw)),
    }
}

impl Cli {
    /// Returns the inventory file path, using the default if not specified.
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(config::default_data_file)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
