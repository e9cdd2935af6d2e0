use super::*;
use chrono::NaiveDate;

fn obs(y: i32, ordinal: u32, v: f64) -> RawObservation {
    RawObservation::on_date(NaiveDate::from_yo_opt(y, ordinal).unwrap(), Some(v))
}

#[test]
fn years_merge_into_one_day_group() {
    let mut input = Vec::new();
    for v in [10.0, 20.0, 30.0] {
        input.push(obs(2001, 200, v));
    }
    for v in [15.0, 25.0, 35.0] {
        input.push(obs(2002, 200, v));
    }
    let table = aggregate_daily(&input);
    let day = table.get_raw(200);
    assert!((day.mean - 22.5).abs() < 1e-12);
    // sorted: 10 15 20 25 30 35
    assert!((day.p10 - 12.5).abs() < 1e-12);
    assert!((day.p90 - 32.5).abs() < 1e-12);
    assert_eq!(table.observed_days(), 1);
    assert!((day.p90_scaled - 1.0).abs() < 1e-12);
    assert!((table.scale() - 32.5).abs() < 1e-12);
}

#[test]
fn absent_days_are_zero_filled() {
    let table = aggregate_daily(&[obs(2020, 10, 5.0)]);
    assert_eq!(table.len(), 366);
    assert_eq!(table.get_raw(11), DailyStatistic::default());
    assert_eq!(table.get_raw(366), DailyStatistic::default());
    // Outside the domain also reads as zero.
    assert_eq!(table.get_raw(0), DailyStatistic::default());
}

#[test]
fn day_with_only_missing_values_is_zero() {
    let d = NaiveDate::from_yo_opt(2020, 45).unwrap();
    let input = [
        RawObservation::on_date(d, None),
        RawObservation::on_date(d, Some(f64::NAN)),
        obs(2020, 46, 4.0),
    ];
    let table = aggregate_daily(&input);
    assert_eq!(table.get_raw(45), DailyStatistic::default());
    assert_eq!(table.get_raw(46).mean, 4.0);
    assert_eq!(table.observed_days(), 1);
}

#[test]
fn all_zero_or_missing_input_scales_to_zero_not_nan() {
    let table = aggregate_daily(&[]);
    assert_eq!(table.scale(), 1.0);
    assert!(table.iter().all(|(_, s)| *s == DailyStatistic::default()));

    let table = aggregate_daily(&[obs(2020, 1, 0.0), obs(2021, 1, 0.0)]);
    assert_eq!(table.scale(), 1.0);
    let s = table.get_raw(1);
    assert_eq!((s.mean_scaled, s.p10_scaled, s.p90_scaled), (0.0, 0.0, 0.0));
}

#[test]
fn single_global_scale_preserves_relative_magnitude() {
    let table = aggregate_daily(&[obs(2020, 100, 50.0), obs(2020, 200, 100.0)]);
    assert_eq!(table.scale(), 100.0);
    assert_eq!(table.get_raw(100).p90_scaled, 0.5);
    assert_eq!(table.get_raw(200).p90_scaled, 1.0);
    assert_eq!(table.get_raw(100).mean_scaled, 0.5);
}

#[test]
fn aggregation_is_idempotent() {
    let input: Vec<_> = (1..=365)
        .map(|d| obs(2019 + (d as i32 % 3), d, f64::from(d % 17)))
        .collect();
    assert_eq!(aggregate_daily(&input), aggregate_daily(&input));
}

#[test]
fn leap_day_lands_on_ordinal_366() {
    let table = aggregate_daily(&[obs(2024, 366, 3.0)]);
    assert_eq!(table.get(DayOfYear::LAST).mean, 3.0);
}
