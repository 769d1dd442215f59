//! Composite time format handling
//!
//! Time columns are joined with single spaces, and so are their formats, so
//! the i-th value is parsed by the i-th format. Swapping two formats does not
//! fail by itself; it only fails when the joined text no longer fits.

use crate::constants::{
    END_OF_DAY_HOUR_MINUTE, HOUR_MINUTE_FORMAT, HOUR_MINUTE_WIDTH, TIME_PART_SEPARATOR,
};
use chrono::format::{Item, Numeric, ParseErrorKind, Parsed, StrftimeItems};
use chrono::{Days, NaiveDateTime};

/// Joined time text and format for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeTime {
    pub text: String,
    pub format: String,
    /// Days to add after parsing (hour/minute `2400` rollover)
    pub day_carry: u64,
}

impl CompositeTime {
    /// Join values with their formats, applying the hour/minute
    /// normalisation when `hour_minute_quirks` is set
    pub fn compose<S: AsRef<str>>(
        values: &[&str],
        formats: &[S],
        hour_minute_quirks: bool,
    ) -> Self {
        let mut parts = Vec::with_capacity(values.len());
        let mut day_carry = 0;

        for (value, format) in values.iter().zip(formats) {
            let value = value.trim();
            if hour_minute_quirks && format.as_ref().trim() == HOUR_MINUTE_FORMAT {
                let (normalized, carry) = normalize_hour_minute(value);
                day_carry += carry;
                parts.push(normalized);
            } else {
                parts.push(value.to_string());
            }
        }

        Self {
            text: parts.join(TIME_PART_SEPARATOR),
            format: formats
                .iter()
                .map(|f| f.as_ref())
                .collect::<Vec<_>>()
                .join(TIME_PART_SEPARATOR),
            day_carry,
        }
    }

    /// Parse into a naive (zone-less) date and time
    pub fn parse(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        let naive = parse_naive(&self.text, &self.format)?;
        Ok(naive
            .checked_add_days(Days::new(self.day_carry))
            .unwrap_or(naive))
    }
}

/// Zero-pad an hour/minute value to four digits; `2400` becomes `0000` with
/// a one day carry
fn normalize_hour_minute(value: &str) -> (String, u64) {
    if value.is_empty()
        || value.len() > HOUR_MINUTE_WIDTH
        || !value.bytes().all(|b| b.is_ascii_digit())
    {
        return (value.to_string(), 0);
    }

    let padded = format!("{:0>width$}", value, width = HOUR_MINUTE_WIDTH);
    if padded == END_OF_DAY_HOUR_MINUTE {
        ("0000".to_string(), 1)
    } else {
        (padded, 0)
    }
}

/// Parse text against a strftime format into a naive date and time
///
/// Fields the format does not mention default the way `strptime` does:
/// time of day to midnight, minutes to zero, and month/day to January 1st
/// when only a year is given. Anything else missing is an error.
pub fn parse_naive(text: &str, format: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, text, items.iter())?;

    let present = FieldsPresent::scan(&items);
    if present.timestamp {
        return parsed.to_naive_datetime_with_offset(0);
    }

    if !present.hour {
        parsed.set_hour(0)?;
    }
    if !present.minute {
        parsed.set_minute(0)?;
    }

    let date = match parsed.to_naive_date() {
        Ok(date) => date,
        Err(error) if error.kind() == ParseErrorKind::NotEnough && present.year_only() => {
            parsed.set_month(1)?;
            parsed.set_day(1)?;
            parsed.to_naive_date()?
        }
        Err(error) => return Err(error),
    };
    let time = parsed.to_naive_time()?;

    Ok(date.and_time(time))
}

/// Which calendar fields a format provides
#[derive(Debug, Default)]
struct FieldsPresent {
    year: bool,
    month_or_day: bool,
    hour: bool,
    minute: bool,
    timestamp: bool,
}

impl FieldsPresent {
    fn scan(items: &[Item<'_>]) -> Self {
        let mut present = Self::default();
        for item in items {
            if let Item::Numeric(numeric, _) = item {
                match numeric {
                    Numeric::Year | Numeric::YearMod100 | Numeric::YearDiv100 => {
                        present.year = true
                    }
                    Numeric::IsoYear | Numeric::IsoYearMod100 | Numeric::IsoYearDiv100 => {
                        present.year = true;
                        present.month_or_day = true;
                    }
                    Numeric::Month
                    | Numeric::Day
                    | Numeric::Ordinal
                    | Numeric::WeekFromSun
                    | Numeric::WeekFromMon
                    | Numeric::IsoWeek
                    | Numeric::NumDaysFromSun
                    | Numeric::WeekdayFromMon => present.month_or_day = true,
                    Numeric::Hour | Numeric::Hour12 => present.hour = true,
                    Numeric::Minute => present.minute = true,
                    Numeric::Timestamp => present.timestamp = true,
                    _ => {}
                }
            }
        }
        present
    }

    fn year_only(&self) -> bool {
        self.year && !self.month_or_day
    }
}
