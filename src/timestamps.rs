use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Converts protocol-native POSIX seconds to a UTC instant.
///
/// The wire format has no presence marker for numeric fields, so producers
/// emit `0` for "not set". Zero therefore maps to `None` rather than to the
/// 1970 epoch instant.
pub fn from_epoch(seconds: i64) -> Option<DateTime<Utc>> {
    if seconds == 0 {
        return None;
    }
    Utc.timestamp_opt(seconds, 0).single()
}

/// Parses a GTFS `YYYYMMDD` service date. Empty or malformed values map to
/// `None` rather than failing the row.
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_absent() {
        assert_eq!(from_epoch(0), None);
    }

    #[test]
    fn epoch_one_is_one_second_past_the_epoch() {
        let ts = from_epoch(1).unwrap();
        assert_eq!(ts.to_rfc3339(), "1970-01-01T00:00:01+00:00");
    }

    #[test]
    fn ordinary_timestamps_convert() {
        let ts = from_epoch(1_700_000_000).unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }

    #[test]
    fn start_dates_parse_or_degrade() {
        assert_eq!(
            parse_start_date("20240205"),
            NaiveDate::from_ymd_opt(2024, 2, 5)
        );
        assert_eq!(parse_start_date(""), None);
        assert_eq!(parse_start_date("2024-02-05"), None);
    }
}
