use chrono::NaiveDate;
use sensorplot::*;

fn parser() -> LogParser {
    LogParser::new(ParserConfig {
        reference_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        ..ParserConfig::default()
    })
}

// Helper: build a LOCAL timestamp as seconds
fn local_secs(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> f64 {
    use chrono::{Local, TimeZone};
    let ndt = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap();
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.timestamp() as f64)
        .unwrap()
}

const LOG: &str = "\
# logger v2
00:20:05, 24.37, 981.88, 47.44, 100

00:20:10, 24.40, 981.90, 47.50, 99
bad, 1,2,3,4
00:20:15, 1, 2
00:20:20 24.5 982.0 47.6 98
";

#[test]
fn parses_valid_lines_and_skips_the_rest() {
    let parsed = parser().parse_with_report(LOG).unwrap();
    assert_eq!(parsed.timeline.len(), 3);
    for (_, values) in parsed.channels.iter() {
        assert_eq!(values.len(), parsed.timeline.len());
    }
    assert_eq!(parsed.timeline[0], local_secs(2024, 1, 15, 0, 20, 5));
    assert_eq!(
        parsed.channels.get(ChannelKey::Pressure),
        &[981.88, 981.90, 982.0]
    );
    assert_eq!(parsed.report.rejected_bad_time, 1);
    assert_eq!(parsed.report.rejected_too_few_fields, 1);
    assert_eq!(parsed.report.skipped_blank_or_comment, 2);
    assert_eq!(parsed.report.rollovers, 0);
}

#[test]
fn rollover_is_two_seconds() {
    let (timeline, _) = parser()
        .parse("23:59:59, 1, 2, 3, 4\n00:00:01, 1, 2, 3, 4\n")
        .unwrap();
    assert_eq!(timeline[1] - timeline[0], 2.0);
    assert_eq!(timeline[1], local_secs(2024, 1, 16, 0, 0, 1));
}

#[test]
fn timeline_is_non_decreasing_across_several_days() {
    let raw = "22:00:00,1,1,1,1\n23:00:00,1,1,1,1\n01:00:00,1,1,1,1\n01:00:00,1,1,1,1\n\
               12:00:00,1,1,1,1\n03:00:00,1,1,1,1\n";
    let parsed = parser().parse_with_report(raw).unwrap();
    assert!(parsed.timeline.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(parsed.report.rollovers, 2);
    assert_eq!(parsed.timeline[5], local_secs(2024, 1, 17, 3, 0, 0));
}

#[test]
fn bad_time_line_does_not_grow_timeline() {
    let (a, _) = parser().parse("10:00:00, 1,2,3,4\n").unwrap();
    let (b, _) = parser().parse("10:00:00, 1,2,3,4\nbad, 1,2,3,4\n").unwrap();
    assert_eq!(a.len(), b.len());
}

#[test]
fn bad_time_line_does_not_trigger_rollover() {
    let (timeline, _) = parser()
        .parse("10:00:00, 1,2,3,4\n99:00:00, 1,2,3,4\n11:00:00, 1,2,3,4\n")
        .unwrap();
    assert_eq!(timeline, vec![
        local_secs(2024, 1, 15, 10, 0, 0),
        local_secs(2024, 1, 15, 11, 0, 0),
    ]);
}

#[test]
fn bad_numeric_field_becomes_nan() {
    let parsed = parser().parse_with_report("10:00:00, oops, 2,3,4\n").unwrap();
    assert_eq!(parsed.timeline.len(), 1);
    assert!(parsed.channels.get(ChannelKey::Temperature)[0].is_nan());
    assert_eq!(parsed.channels.get(ChannelKey::Pressure), &[2.0]);
    assert_eq!(parsed.channels.get(ChannelKey::Humidity), &[3.0]);
    assert_eq!(parsed.channels.get(ChannelKey::Light), &[4.0]);
    assert_eq!(parsed.report.nan_fields, 1);
}

#[test]
fn all_garbage_channels_still_make_a_sample() {
    let (timeline, channels) = parser().parse("10:00:00, a, b, c, d\n").unwrap();
    assert_eq!(timeline.len(), 1);
    assert!(channels.iter().all(|(_, v)| v[0].is_nan()));
}

#[test]
fn empty_input_is_a_format_error() {
    assert!(matches!(
        parser().parse(""),
        Err(SensorPlotError::Format { lines_seen: 0, .. })
    ));
    assert!(matches!(
        parser().parse("# only a comment\n\nbad, 1,2,3,4\n"),
        Err(SensorPlotError::Format {
            lines_seen: 3,
            lines_rejected: 1
        })
    ));
}

#[test]
fn custom_comment_prefix() {
    let p = LogParser::new(ParserConfig {
        comment_prefix: "//".to_string(),
        reference_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        ..ParserConfig::default()
    });
    let (timeline, _) = p.parse("// note\n10:00:00, 1,2,3,4\n").unwrap();
    assert_eq!(timeline.len(), 1);
}

#[test]
fn missing_file_is_io_error() {
    let err = parser()
        .parse_file("/definitely/not/here/log.txt")
        .unwrap_err();
    assert!(matches!(err, SensorPlotError::Io { .. }));
}

#[test]
fn parse_file_reads_text() {
    let path = std::env::temp_dir().join(format!("sensorplot_parse_{}.txt", std::process::id()));
    std::fs::write(&path, LOG).unwrap();
    let parsed = parser().parse_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(parsed.report.accepted, 3);
}

#[test]
fn leap_second_line_is_rejected() {
    let parsed = parser()
        .parse_with_report("23:59:59,1,2,3,4\n23:59:60,1,2,3,4\n")
        .unwrap();
    assert_eq!(parsed.timeline, vec![local_secs(2024, 1, 15, 23, 59, 59)]);
    assert_eq!(parsed.report.rejected_bad_time, 1);
    assert_eq!(parsed.report.rollovers, 0);
}

#[test]
fn parse_log_uses_default_settings() {
    let (timeline, channels) = parse_log("# header\n10:00:00, 1, 2, 3, 4\n").unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(channels.get(ChannelKey::Light), &[4.0]);
}
