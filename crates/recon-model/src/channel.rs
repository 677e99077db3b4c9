//! Channel series of a channel-paired sheet.
//!
//! A sheet holds one date column and one value column per recording channel.
//! Channel `n` (zero-based) pairs with identifier `n` of the sheet's
//! identifier list; rows are observations aligned across both columns.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Two channel positions believed to record the same physical device.
///
/// Invariant: `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceTuple {
    pub first: usize,
    pub second: usize,
}

impl DeviceTuple {
    /// Builds a tuple, ordering the two positions.
    ///
    /// Returns `None` when both positions are equal.
    pub fn new(n: usize, m: usize) -> Option<Self> {
        match n.cmp(&m) {
            std::cmp::Ordering::Less => Some(Self {
                first: n,
                second: m,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: m,
                second: n,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl From<DeviceTuple> for (usize, usize) {
    fn from(tuple: DeviceTuple) -> Self {
        (tuple.first, tuple.second)
    }
}

/// Aligned `dates_n` / `values_n` series.
///
/// `dates[i]` and `values[i]` describe the same observation row `i`.
/// Missing or unparseable entries are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub dates: Vec<Option<String>>,
    pub values: Vec<Option<f64>>,
}

impl Channel {
    pub fn new(dates: Vec<Option<String>>, values: Vec<Option<f64>>) -> Self {
        Self { dates, values }
    }

    /// First observation, the anchor used for the cheap consistency probe.
    pub fn anchor(&self) -> Option<f64> {
        self.values.first().copied().flatten()
    }

    /// Non-empty date entries in row order.
    pub fn non_empty_dates(&self) -> impl Iterator<Item = &str> {
        self.dates
            .iter()
            .filter_map(|d| d.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Count of present values.
    pub fn observation_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Identifiers plus their channels, positionally aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelTable {
    identifiers: Vec<String>,
    channels: Vec<Channel>,
}

impl ChannelTable {
    /// Builds a table, failing fast when identifiers outnumber channels.
    ///
    /// Extra trailing channels without an identifier are allowed; they are
    /// never referenced by a device tuple.
    pub fn new(identifiers: Vec<String>, channels: Vec<Channel>) -> Result<Self> {
        if identifiers.len() > channels.len() {
            return Err(ModelError::ShapeMismatch {
                identifiers: identifiers.len(),
                channels: channels.len(),
            });
        }
        Ok(Self {
            identifiers,
            channels,
        })
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn identifier(&self, index: usize) -> Option<&str> {
        self.identifiers.get(index).map(String::as_str)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Labelled channels as `(identifier, channel)` pairs.
    pub fn labelled(&self) -> impl Iterator<Item = (&str, &Channel)> {
        self.identifiers
            .iter()
            .map(String::as_str)
            .zip(self.channels.iter())
    }
}
