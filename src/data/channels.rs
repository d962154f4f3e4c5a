//! Channel keys and the index-aligned channel storage produced by the parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SensorPlotError;

/// Absolute sample timestamps in seconds since the UNIX epoch, non-decreasing.
pub type Timeline = Vec<f64>;

/// One of the four measurement streams written by the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKey {
    Temperature,
    Pressure,
    Humidity,
    Light,
}

impl ChannelKey {
    /// All channels in column order (fields 1..=4 of a log line).
    pub const ALL: [ChannelKey; 4] = [
        ChannelKey::Temperature,
        ChannelKey::Pressure,
        ChannelKey::Humidity,
        ChannelKey::Light,
    ];

    pub fn index(&self) -> usize {
        match self {
            ChannelKey::Temperature => 0,
            ChannelKey::Pressure => 1,
            ChannelKey::Humidity => 2,
            ChannelKey::Light => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKey::Temperature => "temperature",
            ChannelKey::Pressure => "pressure",
            ChannelKey::Humidity => "humidity",
            ChannelKey::Light => "light",
        }
    }

    /// Human readable name used by legends.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKey::Temperature => "Temperature",
            ChannelKey::Pressure => "Pressure",
            ChannelKey::Humidity => "Humidity",
            ChannelKey::Light => "Light",
        }
    }

    /// Presentation unit. The log itself carries no units.
    pub fn unit(&self) -> &'static str {
        match self {
            ChannelKey::Temperature => "°C",
            ChannelKey::Pressure => "hPa",
            ChannelKey::Humidity => "%",
            ChannelKey::Light => "%",
        }
    }

    /// `"Temperature (°C)"` style name for a legend entry.
    pub fn legend_name(&self) -> String {
        format!("{} ({})", self.label(), self.unit())
    }

    /// Parse a selection key. `"none"` and the empty string mean "no selection".
    pub fn parse_selection(key: &str) -> Result<Option<ChannelKey>, SensorPlotError> {
        let k = key.trim();
        if k.is_empty() || k.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        k.parse().map(Some)
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKey {
    type Err = SensorPlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let k = s.trim();
        ChannelKey::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(k))
            .ok_or_else(|| SensorPlotError::InvalidChannel(s.to_string()))
    }
}

/// The four channel sequences, each index-aligned with the timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSet {
    channels: [Vec<f64>; 4],
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit per-channel vectors; lengths are not checked here.
    pub fn from_columns(
        temperature: Vec<f64>,
        pressure: Vec<f64>,
        humidity: Vec<f64>,
        light: Vec<f64>,
    ) -> Self {
        Self {
            channels: [temperature, pressure, humidity, light],
        }
    }

    /// Append one reading per channel, in `ChannelKey::ALL` order.
    pub fn push(&mut self, values: [f64; 4]) {
        for (column, v) in self.channels.iter_mut().zip(values) {
            column.push(v);
        }
    }

    pub fn get(&self, key: ChannelKey) -> &[f64] {
        &self.channels[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelKey, &[f64])> {
        ChannelKey::ALL
            .into_iter()
            .map(move |k| (k, self.channels[k.index()].as_slice()))
    }

    /// Length of the first channel whose length differs from `expected`.
    pub fn first_mismatch(&self, expected: usize) -> Option<(ChannelKey, usize)> {
        self.iter()
            .find(|(_, values)| values.len() != expected)
            .map(|(k, values)| (k, values.len()))
    }
}
