use chrono::NaiveDate;
use npl_workout_core::lead_time::{generate, LeadTimeInput};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn input() -> LeadTimeInput {
    LeadTimeInput {
        start_date: d(2025, 1, 6),
        base_bid_value: dec!(500_000_000),
        discount_rate: dec!(0.3),
        lead_time_days: 42,
        round_count: 22,
    }
}

#[test]
fn test_exactly_round_count_entries_in_order() {
    let entries = generate(&input()).unwrap().result;
    assert_eq!(entries.len(), 22);
    for window in entries.windows(2) {
        assert!(window[1].round == window[0].round + 1);
        assert!(window[1].date >= window[0].date);
        assert!(window[1].minimum_bid <= window[0].minimum_bid);
    }
}

#[test]
fn test_round_one_is_the_base_value_on_the_start_date() {
    let entries = generate(&input()).unwrap().result;
    assert_eq!(entries[0].round, 1);
    assert_eq!(entries[0].date, d(2025, 1, 6));
    assert_eq!(entries[0].minimum_bid, dec!(500_000_000));
}

#[test]
fn test_geometric_decay_per_round() {
    let entries = generate(&input()).unwrap().result;
    assert_eq!(entries[1].minimum_bid, dec!(350_000_000));
    assert_eq!(entries[2].minimum_bid, dec!(245_000_000));
    assert_eq!(entries[3].minimum_bid, dec!(171_500_000));
}

#[test]
fn test_week_fraction_date_spacing() {
    let entries = generate(&input()).unwrap().result;
    // Offset for round i is floor((i-1) * 42 * 7 / 11)
    // i=2: floor(294/11)  = 26
    // i=3: floor(588/11)  = 53
    // i=4: floor(882/11)  = 80
    assert_eq!(entries[1].date, d(2025, 2, 1));
    assert_eq!(entries[2].date, d(2025, 2, 28));
    assert_eq!(entries[3].date, d(2025, 3, 27));
}

#[test]
fn test_custom_round_count() {
    let mut short = input();
    short.round_count = 5;
    let entries = generate(&short).unwrap().result;
    assert_eq!(entries.len(), 5);
    assert_eq!(entries.last().unwrap().round, 5);
}

#[test]
fn test_regeneration_replaces_rather_than_patches() {
    let first = generate(&input()).unwrap().result;
    let mut changed = input();
    changed.base_bid_value = dec!(800_000_000);
    let second = generate(&changed).unwrap().result;

    assert_eq!(first.len(), second.len());
    assert_eq!(second[0].minimum_bid, dec!(800_000_000));
    // Dates are a function of start/lead-time only, untouched by the bid
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.date, b.date);
    }
}
