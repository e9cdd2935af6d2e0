use super::*;

fn jan_feb() -> Vec<MonthRange> {
    vec![MonthRange::new("Jan", 1, 31), MonthRange::new("Feb", 32, 59)]
}

#[test]
fn weights_are_day_counts() {
    let w = sector_weights(&jan_feb()).unwrap();
    assert_eq!(w, vec![("Jan".to_owned(), 31), ("Feb".to_owned(), 28)]);
}

#[test]
fn angular_sizes_are_proportional() {
    let layout = SectorLayout::from_month_ranges(&jan_feb()).unwrap();
    assert_eq!(layout.total_days(), 59);
    let jan = layout.get("Jan").unwrap();
    let feb = layout.get("Feb").unwrap();
    assert!((jan.extent_deg() - 31.0 / 59.0 * 360.0).abs() < 1e-9);
    assert!((feb.extent_deg() - 28.0 / 59.0 * 360.0).abs() < 1e-9);
    assert_eq!(jan.start_deg, 0.0);
    assert_eq!(jan.end_deg, feb.start_deg);
    assert_eq!(feb.end_deg, 360.0);
}

#[test]
fn theta_maps_day_offsets_into_the_wedge() {
    let layout = SectorLayout::from_month_ranges(&jan_feb()).unwrap();
    let feb = layout.get("Feb").unwrap();
    assert_eq!(feb.theta(0.0), feb.start_deg);
    assert!((feb.theta(28.0) - feb.end_deg).abs() < 1e-9);
    assert!((feb.theta(14.0) - feb.mid_deg()).abs() < 1e-9);
}

#[test]
fn end_before_start_is_range_error() {
    let ranges = vec![MonthRange::new("Jan", 31, 1)];
    let err = SectorLayout::from_month_ranges(&ranges).unwrap_err();
    assert!(matches!(err, CalendarError::Range(_)));
    assert!(err.to_string().contains("Jan"));
}

#[test]
fn out_of_year_days_and_empty_layouts_are_range_errors() {
    assert!(matches!(
        SectorLayout::from_month_ranges(&[MonthRange::new("X", 360, 370)]),
        Err(CalendarError::Range(_))
    ));
    assert!(matches!(
        SectorLayout::from_month_ranges(&[]),
        Err(CalendarError::Range(_))
    ));
    assert!(matches!(
        SectorLayout::from_month_ranges(&[MonthRange::new("A", 1, 2), MonthRange::new("A", 3, 4)]),
        Err(CalendarError::Range(_))
    ));
}

#[test]
fn single_day_sector_is_allowed() {
    let layout = SectorLayout::from_month_ranges(&[MonthRange::new("D", 5, 5)]).unwrap();
    assert_eq!(layout.sectors()[0].size(), 1.0);
    assert_eq!(layout.sectors()[0].extent_deg(), 360.0);
}

#[test]
fn layout_is_deterministic() {
    let a = SectorLayout::from_month_ranges(&jan_feb()).unwrap();
    let b = SectorLayout::from_month_ranges(&jan_feb()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn days_iterates_inclusive_span() {
    let days: Vec<u16> = MonthRange::new("Feb", 32, 59).days().map(|d| d.get()).collect();
    assert_eq!(days.len(), 28);
    assert_eq!(days[0], 32);
    assert_eq!(days[27], 59);
}
