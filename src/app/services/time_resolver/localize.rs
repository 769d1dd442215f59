//! Localisation of naive logger times into a time zone
//!
//! Loggers record wall-clock time, so a local time can fall into a DST fold
//! (it happens twice) or a gap (it never happens). The default policy reads
//! both as standard time, which is what a logger left on winter time reports.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How to treat local times in a DST fold or gap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Interpret the wall-clock time as standard (non-DST) time
    #[default]
    PreferStandard,
    /// Fail on any fold or gap
    Strict,
}

/// Why a local time could not be mapped to a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalTimeIssue {
    /// Occurs twice (clocks turned back)
    Fold,
    /// Never occurs (clocks turned forward)
    Gap,
}

impl fmt::Display for LocalTimeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalTimeIssue::Fold => f.write_str("time occurs twice at a DST transition"),
            LocalTimeIssue::Gap => f.write_str("time is skipped by a DST transition"),
        }
    }
}

/// Attach a zone to a naive local time under the given policy
pub fn localize(
    naive: &NaiveDateTime,
    zone: Tz,
    policy: AmbiguityPolicy,
) -> Result<DateTime<Tz>, LocalTimeIssue> {
    match zone.from_local_datetime(naive) {
        LocalResult::Single(datetime) => Ok(datetime),
        LocalResult::Ambiguous(earliest, latest) => match policy {
            AmbiguityPolicy::Strict => Err(LocalTimeIssue::Fold),
            AmbiguityPolicy::PreferStandard => Ok(standard_of(earliest, latest)),
        },
        LocalResult::None => match policy {
            AmbiguityPolicy::Strict => Err(LocalTimeIssue::Gap),
            AmbiguityPolicy::PreferStandard => Ok(at_standard_offset(naive, zone)),
        },
    }
}

/// Pick the candidate without a DST component; the later one if both or
/// neither carry one
fn standard_of(earliest: DateTime<Tz>, latest: DateTime<Tz>) -> DateTime<Tz> {
    let is_standard = |datetime: &DateTime<Tz>| datetime.offset().dst_offset() == Duration::zero();
    if is_standard(&earliest) && !is_standard(&latest) {
        earliest
    } else {
        latest
    }
}

/// Read a wall-clock time at the zone's standard UTC offset
fn at_standard_offset(naive: &NaiveDateTime, zone: Tz) -> DateTime<Tz> {
    let base_offset = zone.offset_from_utc_datetime(naive).base_utc_offset();
    zone.from_utc_datetime(&(*naive - base_offset))
}
