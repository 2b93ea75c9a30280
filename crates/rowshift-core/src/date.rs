//! Date serial numbers
//!
//! Dates are stored as 1900-system serial numbers: whole days since 1899-12-31
//! plus a fractional time of day. The system keeps the historical "1900 leap
//! year" bug, so serial 60 is the non-existent 1900-02-29 and every later serial
//! is one day ahead of the plain day count.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Serial of 9999-12-31, the last day a sheet can display
pub const MAX_SERIAL_DAY: f64 = 2_958_465.0;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert a serial number to a date-time
///
/// The time of day is rounded to the nearest second. Returns `None` for
/// negative or non-finite serials, for serials past [`MAX_SERIAL_DAY`] and
/// for serial 60, which names a day that does not exist.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..MAX_SERIAL_DAY + 1.0).contains(&serial) {
        return None;
    }

    let days = serial.floor();
    if days == 60.0 {
        return None;
    }
    let adjusted = if days > 60.0 { days - 1.0 } else { days };
    let seconds = ((serial - days) * SECONDS_PER_DAY).round() as i64;

    epoch()
        .checked_add_signed(Duration::days(adjusted as i64))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Convert a date-time to a serial number
pub fn datetime_to_serial(datetime: NaiveDateTime) -> f64 {
    let days = (datetime.date() - epoch().date()).num_days();
    let days = if days >= 60 { days + 1 } else { days };
    let time = datetime.time();
    let seconds = f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) / 1e9;

    days as f64 + seconds / SECONDS_PER_DAY
}
