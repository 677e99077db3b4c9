//! Consistency validation for redundant recording channels.
//!
//! - [`grouper`]: derives device tuples from colon-delimited identifiers
//! - [`channels`]: anchor probe over each device tuple
//! - [`comparator`]: timestamp symmetric difference across sources
//! - [`counting`]: observation-count pairing across two channel tables
//! - [`duplicates`]: repeated value report for a column

pub mod channels;
pub mod comparator;
pub mod counting;
pub mod duplicates;
pub mod error;
pub mod grouper;
pub mod timestamp;

pub use channels::{ChannelIssue, ChannelReport, ChannelValidator};
pub use comparator::{TimestampComparator, TimestampDiff};
pub use counting::{CountMismatch, CountReport, pair_count_mismatches};
pub use duplicates::{RepeatedValue, RepeatedValues, repeated_values};
pub use error::{Result, ValidateError};
pub use grouper::{build_device_tuples, group_positions};
pub use timestamp::{CANONICAL_FORMAT, TimestampFormats, canonical};
