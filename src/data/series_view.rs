//! SeriesView: the loaded timeline plus a single active channel, recomputed into
//! plot-ready points and x bounds on every change.

use crate::data::channels::{ChannelKey, ChannelSet, Timeline};
use crate::data::x_formatter::format_axis_label;
use crate::error::{Result, SensorPlotError};

/// Default padding added on each side of the x range, as a fraction of the range.
pub const DEFAULT_X_PADDING: f64 = 0.02;

/// Points for one channel, ready for a rendering backend.
///
/// `NaN` values are kept; backends must treat them as gaps, not zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub channel: Option<ChannelKey>,
    pub points: Vec<[f64; 2]>,
    /// Padded `(min, max)` of the x values, `None` for an empty series.
    pub x_bounds: Option<(f64, f64)>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p[1])
    }
}

pub struct SeriesView {
    timeline: Timeline,
    channels: ChannelSet,
    active: Option<ChannelKey>,
    x_padding: f64,
    current: Series,
}

impl Default for SeriesView {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesView {
    pub fn new() -> Self {
        Self::with_padding(DEFAULT_X_PADDING)
    }

    pub fn with_padding(x_padding: f64) -> Self {
        Self {
            timeline: Timeline::new(),
            channels: ChannelSet::new(),
            active: None,
            x_padding,
            current: Series::default(),
        }
    }

    /// Replace the data wholesale and clear the selection.
    ///
    /// On a length mismatch nothing is changed.
    pub fn load(&mut self, timeline: Timeline, channels: ChannelSet) -> Result<()> {
        if let Some((key, len)) = channels.first_mismatch(timeline.len()) {
            log::warn!(
                "refusing load: channel {} has {} values, timeline has {}",
                key,
                len,
                timeline.len()
            );
            return Err(SensorPlotError::Integrity {
                timeline: timeline.len(),
                channel: key.as_str(),
                len,
            });
        }
        log::debug!("loaded {} samples", timeline.len());
        self.timeline = timeline;
        self.channels = channels;
        self.active = None;
        self.recompute();
        Ok(())
    }

    /// Select the single active channel by name; `"none"` clears the selection.
    ///
    /// Unknown names fail and keep the previous selection.
    pub fn set_active_channel(&mut self, key: &str) -> Result<()> {
        match ChannelKey::parse_selection(key) {
            Ok(selection) => {
                self.select(selection);
                Ok(())
            }
            Err(e) => {
                log::warn!("ignoring selection of unknown channel {:?}", key);
                Err(e)
            }
        }
    }

    /// Typed form of [`set_active_channel`](Self::set_active_channel).
    pub fn select(&mut self, channel: Option<ChannelKey>) {
        if self.active != channel {
            log::debug!(
                "active channel: {}",
                channel.map(|c| c.as_str()).unwrap_or("none")
            );
        }
        self.active = channel;
        self.recompute();
    }

    pub fn active_channel(&self) -> Option<ChannelKey> {
        self.active
    }

    pub fn timeline(&self) -> &[f64] {
        &self.timeline
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// The series for the active channel as of the last load or selection.
    pub fn current_series(&self) -> &Series {
        &self.current
    }

    pub fn format_axis_label(timestamp_secs: f64) -> String {
        format_axis_label(timestamp_secs)
    }

    fn recompute(&mut self) {
        self.current = match self.active {
            Some(key) => build_series(key, &self.timeline, self.channels.get(key), self.x_padding),
            None => Series::default(),
        };
    }
}

/// Pair `timeline` with `values`, truncated to the shorter of the two.
pub fn build_series(key: ChannelKey, timeline: &[f64], values: &[f64], x_padding: f64) -> Series {
    let points: Vec<[f64; 2]> = timeline
        .iter()
        .zip(values)
        .map(|(&t, &v)| [t, v])
        .collect();
    let x_bounds = padded_x_bounds(&points, x_padding);
    Series {
        channel: Some(key),
        points,
        x_bounds,
    }
}

/// `(min, max)` of the x values widened by `padding * (max - min)` on each side.
pub fn padded_x_bounds(points: &[[f64; 2]], padding: f64) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p[0]);
        max_x = max_x.max(p[0]);
    }
    if min_x > max_x {
        return None;
    }
    let pad = (max_x - min_x) * padding;
    Some((min_x - pad, max_x + pad))
}
