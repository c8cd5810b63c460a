//! Clock formatting and parsing.

use tgalign::timestamp::{format_clock, format_clock_with_hours, parse_clock};

#[test]
fn centiseconds_round_once_from_the_total() {
    assert_eq!(format_clock(59.999), "01:00.00");
    assert_eq!(format_clock(0.004), "00:00.00");
    assert_eq!(format_clock(0.006), "00:00.01");
}

#[test]
fn minutes_are_not_capped() {
    assert_eq!(format_clock(3725.5), "62:05.50");
    assert_eq!(format_clock_with_hours(3725.5), "01:02:05.50");
}

#[test]
fn parse_accepts_both_layouts() {
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
    assert!(close(parse_clock("62:05.50").unwrap(), 3725.5));
    assert!(close(parse_clock("01:02:05.50").unwrap(), 3725.5));
    assert!(parse_clock("00:60.00").is_none());
    assert!(parse_clock("1:2:3:4").is_none());
    assert!(parse_clock("ab:cd.ef").is_none());
}

#[test]
fn formatted_values_parse_back() {
    for seconds in [0.0, 1.25, 59.99, 61.0, 3599.99] {
        let parsed = parse_clock(&format_clock(seconds)).unwrap();
        assert!((parsed - seconds).abs() < 0.006, "{seconds} -> {parsed}");
    }
}
