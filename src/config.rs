//! Configuration shared by the parser, the series view and the command-line front end.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::channels::ChannelKey;
use crate::data::x_formatter::TimeAxisFormatter;
use crate::error::{Result, SensorPlotError};

/// Number of comma/whitespace separated fields a sample line needs:
/// the time-of-day plus one per channel.
pub const SAMPLE_FIELDS: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Parser settings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines starting with this prefix (after trimming) are ignored.
    pub comment_prefix: String,
    /// Calendar day of the first sample. `None` uses today's local date.
    pub reference_date: Option<NaiveDate>,
    /// Minimum number of fields a line must split into.
    pub min_fields: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            comment_prefix: "#".to_string(),
            reference_date: None,
            min_fields: SAMPLE_FIELDS,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View settings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Fraction of the x range added on each side of the computed bounds.
    pub x_padding_fraction: f64,
    /// Channel selected by front ends after a load.
    pub default_channel: Option<ChannelKey>,
    /// chrono format string for x-axis tick labels.
    pub time_format: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            x_padding_fraction: 0.02,
            default_channel: None,
            time_format: "%H:%M:%S".to_string(),
        }
    }
}

impl ViewConfig {
    /// Tick label formatter using [`time_format`](Self::time_format).
    pub fn axis_formatter(&self) -> TimeAxisFormatter {
        TimeAxisFormatter::with_time_format(self.time_format.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SensorPlotConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration, loadable from YAML or JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorPlotConfig {
    pub parser: ParserConfig,
    pub view: ViewConfig,
}

impl SensorPlotConfig {
    /// Reject settings the parser or the view cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.parser.min_fields < SAMPLE_FIELDS {
            return Err(SensorPlotError::Config(format!(
                "parser.min_fields must be at least {}, got {}",
                SAMPLE_FIELDS, self.parser.min_fields
            )));
        }
        let pad = self.view.x_padding_fraction;
        if !pad.is_finite() || pad < 0.0 {
            return Err(SensorPlotError::Config(format!(
                "view.x_padding_fraction must be a non-negative number, got {}",
                pad
            )));
        }
        Ok(())
    }

    /// Parse a config document. JSON is used when `is_json`, YAML otherwise.
    pub fn from_str_with_format(s: &str, is_json: bool) -> Result<Self> {
        let cfg: SensorPlotConfig = if is_json {
            serde_json::from_str(s).map_err(|e| SensorPlotError::Config(e.to_string()))?
        } else {
            serde_yaml::from_str(s).map_err(|e| SensorPlotError::Config(e.to_string()))?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).map_err(|source| SensorPlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_str_with_format(&s, is_json_path(path))?;
        log::debug!("loaded configuration from {:?}", path);
        Ok(cfg)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let s = if is_json_path(path) {
            serde_json::to_string_pretty(self).map_err(|e| SensorPlotError::Config(e.to_string()))?
        } else {
            serde_yaml::to_string(self).map_err(|e| SensorPlotError::Config(e.to_string()))?
        };
        fs::write(path, s).map_err(|source| SensorPlotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
