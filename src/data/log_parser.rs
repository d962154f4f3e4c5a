//! Parse logger text into an absolute timeline plus four channel columns.
//!
//! Each sample line looks like
//!
//! ```text
//! 00:20:05, 24.37, 981.88, 47.44, 100
//! ```
//!
//! The logger only records the time of day, so the parser rebuilds absolute
//! timestamps from a reference calendar day and moves that day forward whenever
//! the clock appears to run backwards (midnight rollover). Malformed lines are
//! skipped and unparsable readings become `NaN`; the whole parse only fails when
//! nothing usable is found.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike};

use crate::config::{ParserConfig, SAMPLE_FIELDS};
use crate::data::channels::{ChannelSet, Timeline};
use crate::error::{Result, SensorPlotError};

const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

/// One accepted log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the UNIX epoch.
    pub timestamp: f64,
    /// Readings in `ChannelKey::ALL` order, `NaN` where a field did not parse.
    pub values: [f64; 4],
}

// ─────────────────────────────────────────────────────────────────────────────
// RollState
// ─────────────────────────────────────────────────────────────────────────────

/// Reference day and last accepted timestamp, threaded through the parse loop.
///
/// At most one day boundary is assumed between two consecutive accepted samples:
/// a candidate earlier than the previous timestamp moves the reference day forward
/// by exactly one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollState {
    reference_day: NaiveDate,
    last_timestamp: Option<f64>,
}

impl RollState {
    pub fn new(reference_day: NaiveDate) -> Self {
        Self {
            reference_day,
            last_timestamp: None,
        }
    }

    pub fn reference_day(&self) -> NaiveDate {
        self.reference_day
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Turn a time of day into an absolute timestamp and record it.
    ///
    /// Returns the timestamp and whether the reference day was advanced.
    pub fn advance(&mut self, time_of_day: NaiveTime) -> (f64, bool) {
        let mut candidate = local_timestamp(self.reference_day, time_of_day);
        let mut rolled = false;

        if let Some(last) = self.last_timestamp {
            if candidate < last {
                self.reference_day = self.reference_day.succ_opt().unwrap_or(self.reference_day);
                candidate = local_timestamp(self.reference_day, time_of_day);
                rolled = true;
                log::debug!(
                    "midnight rollover at {}: reference day is now {}",
                    time_of_day,
                    self.reference_day
                );
                // A DST fold can leave the next-day candidate behind; keep the timeline monotonic.
                if candidate < last {
                    candidate = last;
                }
            }
        }

        self.last_timestamp = Some(candidate);
        (candidate, rolled)
    }
}

/// Seconds since the epoch for `day` + `time_of_day` in the local time zone.
///
/// Ambiguous local times take the earliest instant; times inside a DST gap are
/// moved forward by an hour.
fn local_timestamp(day: NaiveDate, time_of_day: NaiveTime) -> f64 {
    let naive = day.and_time(time_of_day);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .map(|dt| dt.timestamp() as f64)
        .unwrap_or_else(|| naive.and_utc().timestamp() as f64)
}

// ─────────────────────────────────────────────────────────────────────────────
// Line classification
// ─────────────────────────────────────────────────────────────────────────────

/// Why a line did not produce a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSkip {
    Blank,
    Comment,
    TooFewFields,
    BadTime,
}

/// A line that passed the structural checks, not yet placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub time_of_day: NaiveTime,
    pub values: [f64; 4],
}

/// Counters collected over one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub lines_total: usize,
    pub accepted: usize,
    pub skipped_blank_or_comment: usize,
    pub rejected_too_few_fields: usize,
    pub rejected_bad_time: usize,
    pub rollovers: usize,
    /// Channel fields that did not parse and were stored as `NaN`.
    pub nan_fields: usize,
}

impl ParseReport {
    pub fn rejected(&self) -> usize {
        self.rejected_too_few_fields + self.rejected_bad_time
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub timeline: Timeline,
    pub channels: ChannelSet,
    pub report: ParseReport,
}

// ─────────────────────────────────────────────────────────────────────────────
// LogParser
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct LogParser {
    config: ParserConfig,
}

impl LogParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse raw log text into a timeline and its channels.
    pub fn parse(&self, raw: &str) -> Result<(Timeline, ChannelSet)> {
        let parsed = self.parse_with_report(raw)?;
        Ok((parsed.timeline, parsed.channels))
    }

    /// Read a UTF-8 log file and parse it.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedLog> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SensorPlotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {:?}", raw.len(), path);
        self.parse_with_report(&raw)
    }

    pub fn parse_with_report(&self, raw: &str) -> Result<ParsedLog> {
        let reference_day = self
            .config
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let mut state = RollState::new(reference_day);
        let mut timeline = Timeline::new();
        let mut channels = ChannelSet::new();
        let mut report = ParseReport::default();

        for (idx, line) in raw.lines().enumerate() {
            report.lines_total += 1;
            let raw_sample = match self.classify_line(line) {
                Ok(s) => s,
                Err(LineSkip::Blank) | Err(LineSkip::Comment) => {
                    report.skipped_blank_or_comment += 1;
                    continue;
                }
                Err(LineSkip::TooFewFields) => {
                    report.rejected_too_few_fields += 1;
                    log::debug!("line {}: too few fields, skipped", idx + 1);
                    continue;
                }
                Err(LineSkip::BadTime) => {
                    report.rejected_bad_time += 1;
                    log::debug!("line {}: unparsable time of day, skipped", idx + 1);
                    continue;
                }
            };

            let (timestamp, rolled) = state.advance(raw_sample.time_of_day);
            if rolled {
                report.rollovers += 1;
            }
            report.nan_fields += raw_sample.values.iter().filter(|v| v.is_nan()).count();
            report.accepted += 1;

            timeline.push(timestamp);
            channels.push(raw_sample.values);
        }

        if timeline.is_empty() {
            log::warn!(
                "no usable samples in {} lines ({} rejected)",
                report.lines_total,
                report.rejected()
            );
            return Err(SensorPlotError::Format {
                lines_seen: report.lines_total,
                lines_rejected: report.rejected(),
            });
        }

        log::info!(
            "parsed {} samples ({} rejected, {} rollovers, {} NaN fields)",
            report.accepted,
            report.rejected(),
            report.rollovers,
            report.nan_fields
        );
        Ok(ParsedLog {
            timeline,
            channels,
            report,
        })
    }

    /// Check one line without touching any roll state.
    pub fn classify_line(&self, line: &str) -> std::result::Result<RawSample, LineSkip> {
        let line = line.trim();
        if line.is_empty() {
            return Err(LineSkip::Blank);
        }
        let prefix = self.config.comment_prefix.as_str();
        if !prefix.is_empty() && line.starts_with(prefix) {
            return Err(LineSkip::Comment);
        }

        let min_fields = self.config.min_fields.max(SAMPLE_FIELDS);
        let fields = split_fields(line, min_fields).ok_or(LineSkip::TooFewFields)?;
        let time_of_day = parse_time_of_day(fields[0]).ok_or(LineSkip::BadTime)?;

        let mut values = [f64::NAN; 4];
        for (slot, field) in values.iter_mut().zip(&fields[1..5]) {
            *slot = parse_reading(field);
        }
        Ok(RawSample {
            time_of_day,
            values,
        })
    }

    /// Accept a single line against `state`. Rejected lines leave `state` unchanged.
    pub fn parse_line(
        &self,
        line: &str,
        state: &mut RollState,
    ) -> std::result::Result<Sample, LineSkip> {
        let raw = self.classify_line(line)?;
        let (timestamp, _) = state.advance(raw.time_of_day);
        Ok(Sample {
            timestamp,
            values: raw.values,
        })
    }
}

/// Parse with the default configuration (today as the reference day).
pub fn parse_log(raw: &str) -> Result<(Timeline, ChannelSet)> {
    LogParser::default().parse(raw)
}

/// Comma split, falling back to whitespace when that yields too few fields.
fn split_fields(line: &str, min_fields: usize) -> Option<Vec<&str>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() >= min_fields {
        return Some(fields);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    (fields.len() >= min_fields).then_some(fields)
}

/// `HH:MM:SS` with seconds in `0..=59`; chrono's leap second `60` is rejected.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_OF_DAY_FORMAT)
        .ok()
        .filter(|t| t.nanosecond() < 1_000_000_000)
}

/// A channel reading, `NaN` if the field is not a number.
fn parse_reading(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}
