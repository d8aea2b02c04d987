//! Timestamp formatting
//!
//! The exchange expects ISO-8601 timestamps with microsecond precision and no
//! zone suffix, e.g. `2014-11-06T10:34:47.123456`. Inputs are always UTC;
//! naive values must be converted explicitly with `NaiveDateTime::and_utc`.

use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SS.ffffff`
pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Format the current instant
pub fn format_timestamp_now() -> String {
    format_timestamp(&Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_microsecond_precision() {
        let dt = DateTime::parse_from_rfc3339("2014-11-06T10:34:47.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&dt), "2014-11-06T10:34:47.123456");
    }

    #[test]
    fn test_whole_seconds_pad_fraction() {
        let dt = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&dt), "2021-01-02T03:04:05.000000");
    }

    #[test]
    fn test_nanoseconds_truncate_to_micros() {
        let dt = NaiveDate::from_ymd_opt(2022, 6, 30)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap()
            .and_utc();
        assert_eq!(format_timestamp(&dt), "2022-06-30T23:59:59.999999");
    }

    #[test]
    fn test_offset_input_is_converted_to_utc() {
        let dt = DateTime::parse_from_rfc3339("2014-11-06T12:34:47.5+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&dt), "2014-11-06T10:34:47.500000");
    }

    #[test]
    fn test_now_has_expected_shape() {
        let now = format_timestamp_now();
        assert_eq!(now.len(), "2014-11-06T10:34:47.123456".len());
        assert_eq!(&now[10..11], "T");
        assert_eq!(&now[19..20], ".");
    }
}
