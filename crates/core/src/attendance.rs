//! Attendance duration rules.
//!
//! Check-in and check-out times arrive as free-form clock strings from the
//! client (`"09:00:00"` or `"09:00:00 AM"`). The worked duration is stored
//! as a label (`"8h 30m"`) and reported as decimal hours.

use chrono::NaiveTime;

use crate::error::CoreError;

pub const STATUS_CHECKED_IN: &str = "checked-in";
pub const STATUS_CHECKED_OUT: &str = "checked-out";

/// Label stored when the clock strings cannot be parsed.
pub const UNKNOWN_DURATION: &str = "-";

const CLOCK_24H: &str = "%H:%M:%S";
const CLOCK_12H: &str = "%I:%M:%S %p";

fn clock_format(check_in: &str) -> &'static str {
    let upper = check_in.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        CLOCK_12H
    } else {
        CLOCK_24H
    }
}

/// Compute the duration label between a check-in and a check-out.
///
/// Both strings are parsed with the format implied by the check-in. When
/// either fails to parse the label is [`UNKNOWN_DURATION`]. A check-out
/// earlier than the check-in is rejected.
pub fn duration_label(check_in: &str, check_out: &str) -> Result<String, CoreError> {
    let format = clock_format(check_in);
    let (Ok(start), Ok(end)) = (
        NaiveTime::parse_from_str(check_in.trim(), format),
        NaiveTime::parse_from_str(check_out.trim(), format),
    ) else {
        return Ok(UNKNOWN_DURATION.to_string());
    };

    if end < start {
        return Err(CoreError::Validation(
            "Check-out time is earlier than check-in time".into(),
        ));
    }

    let minutes = (end - start).num_minutes();
    Ok(format!("{}h {}m", minutes / 60, minutes % 60))
}

/// Convert a stored duration label into decimal hours, rounded to 2 places.
///
/// Missing, `"-"` or malformed labels count as zero.
pub fn duration_hours(label: Option<&str>) -> f64 {
    let Some(label) = label.map(str::trim).filter(|l| !l.is_empty() && *l != UNKNOWN_DURATION)
    else {
        return 0.0;
    };

    let parsed = match label.split_once('h') {
        Some((hours, rest)) => {
            let hours = hours.trim().parse::<i64>();
            let minutes = match rest.trim().trim_end_matches('m').trim() {
                "" => Ok(0),
                m => m.parse::<i64>(),
            };
            hours.and_then(|h| minutes.map(|m| (h, m)))
        }
        None => label.trim_end_matches('m').trim().parse::<i64>().map(|m| (0, m)),
    };

    match parsed {
        Ok((hours, minutes)) => {
            let total = hours as f64 + minutes as f64 / 60.0;
            (total * 100.0).round() / 100.0
        }
        Err(_) => 0.0,
    }
}
