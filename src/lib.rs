//! sensorplot crate root: re-exports and module wiring.
//!
//! Turns the text logs written by the environmental data logger into a
//! plot-ready series:
//! - `data::log_parser`: rebuild an absolute timeline from time-of-day stamps
//! - `data::series_view`: single active channel, points and x bounds
//! - `data::x_formatter`: axis tick labels
//! - `data::export`: CSV export of the current series
//! - `plot`: egui_plot adapters
//! - `config`: parser and view settings

pub mod config;
pub mod data;
pub mod error;
pub mod plot;

// Public re-exports for a compact external API
pub use config::{ParserConfig, SensorPlotConfig, ViewConfig};
pub use data::channels::{ChannelKey, ChannelSet, Timeline};
pub use data::log_parser::{parse_log, LogParser, ParseReport, ParsedLog, RollState, Sample};
pub use data::series_view::{Series, SeriesView};
pub use data::x_formatter::{format_axis_label, TimeAxisFormatter};
pub use error::{Result, SensorPlotError};
