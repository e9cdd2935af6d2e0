use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::json;

use super::*;
use crate::render::primitive::{Layer, Primitive};
use crate::stats::observation::RawObservation;

fn config_json() -> serde_json::Value {
    json!({
        "colors": {
            "ops": { "spill": "#d62728", "hold": "#2ca02c" },
            "flow": { "env": "#1f77b4", "mean": "black" }
        },
        "month_ranges": { "Jan": [1, 31], "Feb": [32, 59] },
        "track_configs": {
            "spill": { "type": "infill", "r_start": 80, "r_end": 90, "color": "ops.spill", "months": ["Jan"] },
            "survey": {
                "type": "marker", "color": "ops.hold", "months": ["Feb"],
                "r_points": { "Feb": 75 }, "position": 14, "marker": "*"
            },
            "flow": {
                "type": "data_plot", "r_start": 40, "r_end": 70, "source": "streamflow",
                "color": "flow.env", "line_color": "flow.mean", "months": ["Jan", "Feb"]
            }
        },
        "legend_groups": {
            "Operations": { "color": "ops.spill", "elements": [ { "type": "patch", "label": "Spill" } ] }
        },
        "plot_settings": {
            "figsize": { "plot": [4, 4] },
            "legend": { "bbox": [0.0, -0.1] }
        }
    })
}

fn calendar() -> DecisionCalendar {
    DecisionCalendar::new(CalendarConfig::from_json_str(&config_json().to_string()).unwrap())
}

fn table() -> DailyStatsTable {
    let obs: Vec<_> = (1..=59)
        .map(|d| {
            let date = NaiveDate::from_yo_opt(2021, d).unwrap();
            RawObservation::on_date(date, Some(f64::from(d)))
        })
        .collect();
    aggregate_daily(&obs)
}

#[test]
fn figure_holds_furniture_tracks_and_legend() {
    let cal = calendar().with_stats("streamflow", table());
    let fig = cal.create_plot(None).unwrap();

    // Outline and label per sector.
    assert_eq!(fig.calls_on(Layer::Background).count(), 2);
    assert_eq!(fig.calls_on(Layer::Text).count(), 2);
    // Infill only in Jan.
    assert_eq!(fig.calls_on(Layer::Decoration).count(), 1);
    // Envelope and mean line in both sectors.
    assert_eq!(fig.calls_on(Layer::EnvelopeFill).count(), 2);
    assert_eq!(fig.calls_on(Layer::MeanLine).count(), 2);
    assert_eq!(fig.calls_on(Layer::Marker).count(), 1);

    let layers: Vec<_> = fig.calls().iter().map(|c| c.layer).collect();
    let mut sorted = layers.clone();
    sorted.sort();
    assert_eq!(layers, sorted);

    assert_eq!(fig.legend().columns.len(), 1);
    assert_eq!(fig.legend().columns[0].header, "Operations:");
}

#[test]
fn data_track_without_table_draws_nothing() {
    let fig = calendar().create_plot(None).unwrap();
    assert_eq!(fig.calls_on(Layer::EnvelopeFill).count(), 0);
    assert_eq!(fig.calls_on(Layer::Decoration).count(), 1);
}

#[test]
fn envelope_follows_scaled_values() {
    let cal = calendar().with_stats("streamflow", table());
    let fig = cal.create_plot(None).unwrap();
    let feb_band = fig
        .calls_on(Layer::EnvelopeFill)
        .find(|c| c.sector == "Feb")
        .unwrap();
    match &feb_band.primitive {
        Primitive::Band { upper, .. } => {
            assert_eq!(upper.len(), 28);
            // Day 59 carries the largest value, so it reaches the band's outer edge.
            assert!((upper[27].r - 70.0).abs() < 1e-9);
        }
        other => panic!("unexpected primitive {other:?}"),
    }
}

#[test]
fn inverted_month_range_is_range_error() {
    let mut v = config_json();
    v["month_ranges"]["Feb"] = json!([59, 32]);
    let cal = DecisionCalendar::new(CalendarConfig::from_json_str(&v.to_string()).unwrap());
    let err = cal.create_plot(None).unwrap_err();
    assert!(matches!(err, CalendarError::Range(_)));
}

#[test]
fn missing_center_image_is_config_error() {
    let err = calendar()
        .create_plot(Some(Path::new("target/no-such-image.png")))
        .unwrap_err();
    assert!(matches!(err, CalendarError::Config(_)));
}

#[test]
fn from_path_loads_declared_sources() {
    let dir = PathBuf::from("target").join("calendar_unit");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("flow.csv"),
        "datetime,discharge\n2020-01-01,4\n2021-01-01,6\n2020-02-01,\n",
    )
    .unwrap();

    let mut v = config_json();
    v["data_sources"] = json!({ "streamflow": { "path": "flow.csv", "value_column": "discharge" } });
    let cfg_path = dir.join("calendar.json");
    std::fs::write(&cfg_path, v.to_string()).unwrap();

    let cal = DecisionCalendar::from_path(&cfg_path).unwrap();
    let table = cal.stats("streamflow").unwrap();
    assert_eq!(table.observed_days(), 1);
    assert_eq!(table.get_raw(1).mean, 5.0);
    assert_eq!(table.get_raw(32).mean, 0.0);
}

#[test]
fn from_path_surfaces_data_errors_before_rendering() {
    let dir = PathBuf::from("target").join("calendar_unit_bad");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("flow.csv"), "datetime,swe\n2020-01-01,4\n").unwrap();

    let mut v = config_json();
    v["data_sources"] = json!({ "streamflow": { "path": "flow.csv", "value_column": "discharge" } });
    let cfg_path = dir.join("calendar.json");
    std::fs::write(&cfg_path, v.to_string()).unwrap();

    let err = DecisionCalendar::from_path(&cfg_path).unwrap_err();
    assert!(matches!(err, CalendarError::DataFormat(_)));
}
