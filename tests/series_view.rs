use chrono::NaiveDate;
use sensorplot::*;

fn loaded_view() -> SeriesView {
    let parser = LogParser::new(ParserConfig {
        reference_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        ..ParserConfig::default()
    });
    let (timeline, channels) = parser
        .parse(
            "10:00:00, 20.0, 1000.0, 40.0, 90\n\
             10:00:10, 21.0, 1001.0, 41.0, 80\n\
             10:00:20, 22.0, oops, 42.0, 70\n",
        )
        .unwrap();
    let mut view = SeriesView::new();
    view.load(timeline, channels).unwrap();
    view
}

#[test]
fn load_resets_selection_to_none() {
    let mut view = loaded_view();
    assert_eq!(view.active_channel(), None);
    assert!(view.current_series().is_empty());
    assert_eq!(view.current_series().x_bounds, None);

    view.set_active_channel("light").unwrap();
    let timeline = view.timeline().to_vec();
    let channels = view.channels().clone();
    view.load(timeline, channels).unwrap();
    assert_eq!(view.active_channel(), None);
}

#[test]
fn pressure_series_matches_channel() {
    let mut view = loaded_view();
    view.set_active_channel("temperature").unwrap();
    view.set_active_channel("pressure").unwrap();
    let series = view.current_series();
    assert_eq!(series.channel, Some(ChannelKey::Pressure));
    let ys: Vec<f64> = series.ys().collect();
    assert_eq!(&ys[..2], &[1000.0, 1001.0]);
    assert!(ys[2].is_nan());
    let xs: Vec<f64> = series.points.iter().map(|p| p[0]).collect();
    assert_eq!(xs, view.timeline());
}

#[test]
fn x_bounds_padded_by_two_percent() {
    let mut view = loaded_view();
    view.set_active_channel("humidity").unwrap();
    let t0 = view.timeline()[0];
    let (lo, hi) = view.current_series().x_bounds.unwrap();
    assert!((lo - (t0 - 0.4)).abs() < 1e-6);
    assert!((hi - (t0 + 20.4)).abs() < 1e-6);
}

#[test]
fn unknown_channel_keeps_previous_selection() {
    let mut view = loaded_view();
    view.set_active_channel("humidity").unwrap();
    let before = view.current_series().clone();
    let err = view.set_active_channel("bogus").unwrap_err();
    assert!(matches!(err, SensorPlotError::InvalidChannel(ref k) if k == "bogus"));
    assert_eq!(view.active_channel(), Some(ChannelKey::Humidity));
    assert_eq!(view.current_series().channel, before.channel);
    assert_eq!(view.current_series().len(), before.len());
}

#[test]
fn none_clears_selection() {
    let mut view = loaded_view();
    view.set_active_channel("light").unwrap();
    view.set_active_channel("none").unwrap();
    assert_eq!(view.active_channel(), None);
    assert!(view.current_series().is_empty());
}

#[test]
fn mismatched_load_is_rejected_and_state_kept() {
    let mut view = loaded_view();
    view.set_active_channel("temperature").unwrap();
    let channels = ChannelSet::from_columns(vec![1.0], vec![1.0, 2.0], vec![1.0], vec![1.0]);
    let err = view.load(vec![0.0], channels).unwrap_err();
    assert!(matches!(
        err,
        SensorPlotError::Integrity {
            timeline: 1,
            channel: "pressure",
            len: 2
        }
    ));
    assert_eq!(view.timeline().len(), 3);
    assert_eq!(view.active_channel(), Some(ChannelKey::Temperature));
    assert_eq!(view.current_series().len(), 3);
}

#[test]
fn axis_label_round_trips_time_of_day() {
    let mut view = loaded_view();
    view.set_active_channel("temperature").unwrap();
    let labels: Vec<String> = view
        .timeline()
        .iter()
        .map(|&t| SeriesView::format_axis_label(t))
        .collect();
    assert_eq!(labels, vec!["10:00:00", "10:00:10", "10:00:20"]);
    assert_eq!(SeriesView::format_axis_label(f64::NAN), "");
}
