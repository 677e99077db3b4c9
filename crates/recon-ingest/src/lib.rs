//! Source data ingestion.
//!
//! Loads CSV files into string-typed Polars frames and turns them into the
//! model types the matcher and validators consume.
//!
//! # Features
//!
//! - **CSV Loading**: all-string reads that keep leading zeros intact
//! - **Entity Datasets**: configurable column bindings per source
//! - **Channel Sheets**: identifier column split, route prefix stripping,
//!   `dates_k`/`values_k` renaming
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use recon_ingest::{ColumnBindings, SheetOptions, read_channel_sheet, read_entity_dataset};
//!
//! let bindings = ColumnBindings::new("Meter", "Code").with_category("Zone");
//! let meters = read_entity_dataset(Path::new("meters.csv"), &bindings, "meters")?;
//! let sheet = read_channel_sheet(Path::new("feature_1.csv"), &SheetOptions::default())?;
//! ```

mod dataset;
mod error;
mod reader;
mod sheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file, column_strings, read_csv, read_lines, require_column,
    validate_frame_shape,
};

// === Entity Datasets ===
pub use dataset::{ColumnBindings, entity_dataset_from_frame, read_entity_dataset};

// === Channel Sheets ===
pub use sheet::{
    SheetOptions, channel_column_names, channel_table_from_frame, channels_from_frame,
    read_channel_sheet, rename_channel_columns, split_identifier_column,
};
