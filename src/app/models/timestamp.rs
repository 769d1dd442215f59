//! Zone-aware resolved timestamps

use crate::constants::{CANONICAL_TIME_FORMAT, UTC_OFFSET_FORMAT};
use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Parse an IANA time zone identifier such as `Europe/Stockholm`
pub fn parse_time_zone(zone: &str) -> Result<Tz> {
    zone.trim()
        .parse::<Tz>()
        .map_err(|_| Error::unknown_time_zone(zone))
}

/// An absolute instant with an attached time zone
///
/// Equality, ordering and hashing use the instant only: the same moment seen
/// from two zones compares equal.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTimestamp(DateTime<Tz>);

impl ResolvedTimestamp {
    pub fn new(datetime: DateTime<Tz>) -> Self {
        Self(datetime)
    }

    /// Build from a UTC instant, attaching the given zone
    pub fn from_utc(instant: DateTime<Utc>, zone: Tz) -> Self {
        Self(zone.from_utc_datetime(&instant.naive_utc()))
    }

    pub fn datetime(&self) -> &DateTime<Tz> {
        &self.0
    }

    pub fn time_zone(&self) -> Tz {
        self.0.timezone()
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Same instant expressed in another zone
    pub fn with_time_zone(&self, zone: Tz) -> Self {
        Self(self.0.with_timezone(&zone))
    }

    /// Render as `YYYY-mm-dd HH:MM:SS`, with a `+HHMM` suffix when requested
    pub fn format_canonical(&self, include_offset: bool) -> String {
        if include_offset {
            self.0
                .format(&format!("{}{}", CANONICAL_TIME_FORMAT, UTC_OFFSET_FORMAT))
                .to_string()
        } else {
            self.0.format(CANONICAL_TIME_FORMAT).to_string()
        }
    }
}

impl PartialEq for ResolvedTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ResolvedTimestamp {}

impl PartialOrd for ResolvedTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResolvedTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_utc().cmp(&other.to_utc())
    }
}

impl Hash for ResolvedTimestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_utc().hash(state);
    }
}

impl fmt::Display for ResolvedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_canonical(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::{America::New_York, Europe::Stockholm, UTC};

    fn stockholm_noon() -> ResolvedTimestamp {
        let naive = NaiveDate::from_ymd_opt(2016, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        ResolvedTimestamp::new(Stockholm.from_local_datetime(&naive).unwrap())
    }

    #[test]
    fn test_equality_ignores_attached_zone() {
        let local = stockholm_noon();
        let utc = local.with_time_zone(UTC);
        assert_eq!(local, utc);
        assert_eq!(utc.format_canonical(false), "2016-06-01 10:00:00");
        assert_eq!(utc.time_zone(), UTC);
    }

    #[test]
    fn test_canonical_format_with_offset() {
        let local = stockholm_noon();
        assert_eq!(local.format_canonical(true), "2016-06-01 12:00:00+0200");
        assert_eq!(local.to_string(), "2016-06-01 12:00:00");
        assert_eq!(
            local.with_time_zone(New_York).format_canonical(true),
            "2016-06-01 06:00:00-0400"
        );
    }

    #[test]
    fn test_ordering_by_instant() {
        let earlier = stockholm_noon().with_time_zone(New_York);
        let later = ResolvedTimestamp::from_utc(earlier.to_utc() + chrono::Duration::hours(1), UTC);
        assert!(earlier < later);
    }

    #[test]
    fn test_parse_time_zone() {
        assert_eq!(parse_time_zone("Europe/Stockholm").unwrap(), Stockholm);
        assert!(matches!(
            parse_time_zone("Europe/Atlantis"),
            Err(Error::UnknownTimeZone { .. })
        ));
    }
}
