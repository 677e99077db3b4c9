//! Data model for meter/topology entity reconciliation.
//!
//! This crate holds the read-only artifacts produced and consumed by a single
//! reconciliation run:
//! - **Entities**: keyed records from one source dataset
//! - **Correspondence**: the injective left-to-right pairing built by the matcher
//! - **Channels**: aligned date/value series of a channel-paired sheet
//!
//! # Module Organization
//!
//! - [`entity`]: Entity records and datasets
//! - [`correspondence`]: Ordered, injective correspondence map
//! - [`channel`]: Channel series, channel tables, and device tuples
//! - [`identifier`]: Colon-delimited identifier helpers
//! - [`polars`]: Polars AnyValue utility functions

pub mod channel;
pub mod correspondence;
pub mod entity;
pub mod error;
pub mod identifier;
pub mod polars;

pub use channel::{Channel, ChannelTable, DeviceTuple};
pub use correspondence::CorrespondenceMap;
pub use entity::{EntityDataset, EntityRecord};
pub use error::{ModelError, Result};
pub use identifier::{GroupKey, leading_token, segments};

// Re-export Polars utility functions at crate root for convenience
pub use polars::{any_to_f64, any_to_string, any_to_string_non_empty, format_numeric, parse_f64};
