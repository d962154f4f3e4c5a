//! Error type shared by the parser, the series view and the config loader.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorPlotError {
    /// The whole input produced zero usable samples.
    #[error("no valid data found ({lines_seen} lines read, {lines_rejected} rejected)")]
    Format {
        lines_seen: usize,
        lines_rejected: usize,
    },
    /// `SeriesView::load` received a channel whose length differs from the timeline.
    #[error("channel `{channel}` has {len} values but the timeline has {timeline}")]
    Integrity {
        timeline: usize,
        channel: &'static str,
        len: usize,
    },
    #[error("unknown channel `{0}` (expected temperature, pressure, humidity, light or none)")]
    InvalidChannel(String),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SensorPlotError>;
