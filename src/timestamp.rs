//! Clock-style timestamps used by the aligned-output files.
//!
//! Times are rounded once to whole centiseconds before being split into
//! fields, so a value like `59.999` renders as `01:00.00` rather than the
//! impossible `00:60.00`.

/// Format seconds as `mm:ss.cc`, letting the minutes field grow past 59.
///
/// ```
/// use tgalign::timestamp::format_clock;
///
/// assert_eq!(format_clock(62.35), "01:02.35");
/// assert_eq!(format_clock(3725.0), "62:05.00");
/// ```
pub fn format_clock(seconds: f64) -> String {
    let cs = to_centiseconds(seconds);
    let minutes = cs / 6000;
    let rest = cs % 6000;
    format!("{:02}:{:02}.{:02}", minutes, rest / 100, rest % 100)
}

/// Format seconds as `mm:ss.cc`, or `hh:mm:ss.cc` from one hour on.
///
/// ```
/// use tgalign::timestamp::format_clock_with_hours;
///
/// assert_eq!(format_clock_with_hours(62.35), "01:02.35");
/// assert_eq!(format_clock_with_hours(3725.0), "01:02:05.00");
/// ```
pub fn format_clock_with_hours(seconds: f64) -> String {
    let cs = to_centiseconds(seconds);
    let hours = cs / 360_000;
    if hours == 0 {
        return format_clock(seconds);
    }
    let rest = cs % 360_000;
    let minutes = rest / 6000;
    let rest = rest % 6000;
    format!(
        "{:02}:{:02}:{:02}.{:02}",
        hours,
        minutes,
        rest / 100,
        rest % 100
    )
}

/// Parse `mm:ss.cc` or `hh:mm:ss.cc` into seconds.
///
/// Returns `None` for anything else, including a seconds field of 60 or more
/// and a minutes field of 60 or more when an hours field is present.
pub fn parse_clock(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0u64, parse_digits(m)?, *s),
        [h, m, s] => {
            let minutes = parse_digits(m)?;
            if minutes >= 60 {
                return None;
            }
            (parse_digits(h)?, minutes, *s)
        }
        _ => return None,
    };

    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds, ""));
    let whole = parse_digits(whole)?;
    if whole >= 60 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let fraction: f64 = if fraction.is_empty() {
        0.0
    } else {
        format!("0.{}", fraction).parse().ok()?
    };

    Some((hours * 3600 + minutes * 60 + whole) as f64 + fraction)
}

fn parse_digits(field: &str) -> Option<u64> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn to_centiseconds(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 100.0).round() as u64
}
