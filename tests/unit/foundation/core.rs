use super::*;

#[test]
fn day_of_year_bounds() {
    assert!(DayOfYear::new(0).is_err());
    assert_eq!(DayOfYear::new(1).unwrap(), DayOfYear::FIRST);
    assert_eq!(DayOfYear::new(366).unwrap(), DayOfYear::LAST);
    assert!(matches!(DayOfYear::new(367), Err(CalendarError::Range(_))));
}

#[test]
fn day_of_year_from_date_merges_years() {
    let a = chrono::NaiveDate::from_ymd_opt(2001, 7, 19).unwrap();
    let b = chrono::NaiveDate::from_ymd_opt(2002, 7, 19).unwrap();
    assert_eq!(DayOfYear::from_date(a), DayOfYear::from_date(b));
    assert_eq!(DayOfYear::from_date(a).get(), 200);

    let leap_end = chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert_eq!(DayOfYear::from_date(leap_end), DayOfYear::LAST);
}

#[test]
fn day_of_year_all_covers_domain() {
    let days: Vec<_> = DayOfYear::all().collect();
    assert_eq!(days.len(), 366);
    assert_eq!(days[0], DayOfYear::FIRST);
    assert_eq!(days[365], DayOfYear::LAST);
}

#[test]
fn figure_size_validates_and_converts() {
    let s: FigureSize = serde_json::from_str("[10, 8]").unwrap();
    assert_eq!(s.width_pt(), 720.0);
    assert_eq!(s.height_pt(), 576.0);

    assert!(serde_json::from_str::<FigureSize>("[0, 8]").is_err());
    assert!(FigureSize::new(-1.0, 2.0).is_err());
}
