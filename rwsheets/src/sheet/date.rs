//! Serial date conversion
//!
//! Sheets stores dates as the number of days since 1899-12-30. That is not the
//! 1900-01-01 epoch some desktop spreadsheets use, so the values only agree from
//! March 1900 onwards.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;

/// Day zero of the serial date numbering
pub const SERIAL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    Some(date) => date,
    None => panic!("invalid serial epoch"),
};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Layout tokens, longest first so `MM` wins over `M`
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%m"),
    ("DD", "%d"),
    ("D", "%d"),
    ("HH", "%H"),
    ("H", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// Translate a token layout (`M/D/YYYY`) into a strftime format.
///
/// Layouts that already contain `%` are taken to be strftime formats and returned unchanged.
pub fn strftime_layout(layout: &str) -> String {
    if layout.contains('%') {
        return layout.to_string();
    }

    let mut format = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'outer: while let Some(c) = rest.chars().next() {
        for (token, spec) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                format.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }
        format.push(c);
        rest = &rest[c.len_utf8()..];
    }
    format
}

/// Parse `value` with `layout` as a naive date-time.
///
/// Midnight when the layout has no hour; missing minutes and seconds are zero.
pub fn parse_date(value: &str, layout: &str) -> Result<NaiveDateTime> {
    let format = strftime_layout(layout);
    let mut parsed = Parsed::new();
    parse(&mut parsed, value, StrftimeItems::new(&format))?;

    let date = parsed.to_naive_date()?;
    let time = if parsed.hour_div_12().is_none() && parsed.hour_mod_12().is_none() {
        NaiveTime::MIN
    } else {
        if parsed.minute().is_none() {
            parsed.set_minute(0)?;
        }
        parsed.to_naive_time()?
    };
    Ok(date.and_time(time))
}

/// Returns the Google Sheets serial number for the date.
///
/// Use together with [`number_value`](crate::sheet::values::number_value) and a date
/// number format to write date cells.
pub fn serial_date(value: &str, layout: &str) -> Result<f64> {
    let date = parse_date(value, layout)?;
    Ok(serial_from_datetime(date))
}

/// Serial number of an already parsed date-time
pub fn serial_from_datetime(date: NaiveDateTime) -> f64 {
    let elapsed = date - SERIAL_EPOCH.and_time(NaiveTime::MIN);
    elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Date-time a serial number refers to, `None` if it is out of chrono's range
pub fn datetime_from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    SERIAL_EPOCH
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::milliseconds(millis as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetsError;

    #[test]
    fn test_epoch_is_zero() {
        assert_eq!(serial_date("12/30/1899", "M/D/YYYY").unwrap(), 0.0);
    }

    #[test]
    fn test_known_serials() {
        assert_eq!(serial_date("12/31/1899", "M/D/YYYY").unwrap(), 1.0);
        assert_eq!(serial_date("1/1/1900", "M/D/YYYY").unwrap(), 2.0);
        assert_eq!(serial_date("3/2/2023", "M/D/YYYY").unwrap(), 44987.0);
        assert_eq!(serial_date("2023-03-02", "YYYY-MM-DD").unwrap(), 44987.0);
        assert_eq!(serial_date("01/01/1970", "MM/DD/YYYY").unwrap(), 25569.0);
    }

    #[test]
    fn test_dates_before_epoch_are_negative() {
        assert_eq!(serial_date("12/29/1899", "M/D/YYYY").unwrap(), -1.0);
        assert_eq!(serial_date("1899-12-01", "YYYY-MM-DD").unwrap(), -29.0);
    }

    #[test]
    fn test_strftime_layouts_pass_through() {
        assert_eq!(strftime_layout("%Y-%m-%d"), "%Y-%m-%d");
        assert_eq!(serial_date("2023-03-02", "%Y-%m-%d").unwrap(), 44987.0);
    }

    #[test]
    fn test_layout_translation() {
        assert_eq!(strftime_layout("M/D/YYYY"), "%m/%d/%Y");
        assert_eq!(strftime_layout("DD.MM.YY HH:mm:ss"), "%d.%m.%y %H:%M:%S");
        assert_eq!(strftime_layout("D MMM YYYY"), "%d %b %Y");
        assert_eq!(strftime_layout("MMMM D, YYYY"), "%B %d, %Y");
    }

    #[test]
    fn test_month_names() {
        assert_eq!(serial_date("2 Mar 2023", "D MMM YYYY").unwrap(), 44987.0);
        assert_eq!(serial_date("March 2, 2023", "MMMM D, YYYY").unwrap(), 44987.0);
    }

    #[test]
    fn test_time_of_day_is_fractional() {
        let serial = serial_date("2023-03-02 18:00", "YYYY-MM-DD HH:mm").unwrap();
        assert_eq!(serial, 44987.75);
    }

    #[test]
    fn test_hour_without_minutes() {
        assert_eq!(serial_date("2023-03-02 18", "YYYY-MM-DD HH").unwrap(), 44987.75);
        assert_eq!(serial_date("2023-03-02 18", "%Y-%m-%d %H").unwrap(), 44987.75);
        assert_eq!(serial_date("2023-03-02 06:00:00", "YYYY-MM-DD HH:mm:ss").unwrap(), 44987.25);
    }

    #[test]
    fn test_invalid_hour_fails() {
        assert!(serial_date("2023-03-02 25", "YYYY-MM-DD HH").is_err());
    }

    #[test]
    fn test_not_a_date_fails() {
        for layout in ["M/D/YYYY", "YYYY-MM-DD", "%d.%m.%Y", ""] {
            let err = serial_date("not-a-date", layout).unwrap_err();
            assert!(matches!(err, SheetsError::Parse(_)), "layout {:?}", layout);
        }
    }

    #[test]
    fn test_value_must_match_layout() {
        assert!(serial_date("2023-03-02", "M/D/YYYY").is_err());
        assert!(serial_date("13/1/2023", "M/D/YYYY").is_err());
        assert!(serial_date("2/30/2023", "M/D/YYYY").is_err());
        // Month and day without a year are not a date
        assert!(serial_date("3/2", "M/D").is_err());
    }

    #[test]
    fn test_serial_to_datetime() {
        let date = datetime_from_serial(44987.75).unwrap();
        assert_eq!(
            date,
            NaiveDate::from_ymd_opt(2023, 3, 2).unwrap().and_hms_opt(18, 0, 0).unwrap()
        );
        assert!(datetime_from_serial(f64::NAN).is_none());
        assert!(datetime_from_serial(1e300).is_none());
    }
}
