//! Time handling utilities for analysis datasets.
//!
//! Stacked analysis output stores timestamps as fractional-day floats:
//! the integer part is the calendar date as `%Y%m%d`, the fraction is the
//! elapsed fraction of that day. These helpers convert between that encoding
//! and chrono types.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use thiserror::Error;

/// Errors from fractional-day timestamp decoding.
#[derive(Debug, Error)]
pub enum TimeCodecError {
    #[error("invalid fractional-day timestamp: {0}")]
    InvalidTimestamp(f64),
}

/// Encode a timestamp as a `%Y%m%d.frac-of-day` float.
pub fn to_fractional_day(dt: DateTime<Utc>) -> f64 {
    let date = dt.date_naive();
    let ymd = date.format("%Y%m%d").to_string();
    // the format is fixed-width digits, the parse cannot fail
    let day_part: f64 = ymd.parse().unwrap_or(0.0);

    let seconds = dt.num_seconds_from_midnight() as f64;
    day_part + seconds / 86_400.0
}

/// Decode a `%Y%m%d.frac-of-day` float into a timestamp.
///
/// Fails if the integer part is not a valid calendar date or the value is
/// not finite.
pub fn from_fractional_day(t: f64) -> Result<DateTime<Utc>, TimeCodecError> {
    if !t.is_finite() || t < 0.0 {
        return Err(TimeCodecError::InvalidTimestamp(t));
    }

    let day_part = t.trunc() as i64;
    let frac = t.fract();

    let year = (day_part / 10_000) as i32;
    let month = ((day_part / 100) % 100) as u32;
    let day = (day_part % 100) as u32;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(TimeCodecError::InvalidTimestamp(t))?;
    let midnight = Utc.from_utc_datetime(&date);

    let seconds = (frac * 86_400.0).round() as i64;
    Ok(midnight + Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_midnight() {
        let dt = Utc.with_ymd_and_hms(2016, 9, 23, 0, 0, 0).unwrap();
        let t = to_fractional_day(dt);
        assert!((t - 20160923.0).abs() < 1e-9);
    }

    #[test]
    fn test_encode_noon() {
        let dt = Utc.with_ymd_and_hms(2016, 9, 23, 12, 0, 0).unwrap();
        let t = to_fractional_day(dt);
        assert!((t - 20160923.5).abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2016, 9, 29, 17, 45, 0).unwrap();
        let back = from_fractional_day(to_fractional_day(dt)).unwrap();
        assert_eq!(back, dt);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(from_fractional_day(f64::NAN).is_err());
        assert!(from_fractional_day(-1.0).is_err());
        // month 13 is not a date
        assert!(from_fractional_day(20161301.0).is_err());
    }
}
