//! Timestamp normalization for chat export headers.
//!
//! Exporters write dates in many shapes depending on locale and app version:
//! `1/2/23`, `02/01/2023`, `2023-01-02`, `15.01.24`, with 12h or 24h clocks
//! and assorted whitespace around the AM/PM marker. [`normalize_timestamp`]
//! tries a fixed, ordered list of layouts and returns the first exact match.
//!
//! The order is a policy, chosen by [`DateOrder`]. See [`date_layouts`] for
//! the exact sequence.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::DateOrder;
use crate::error::LineError;

/// Separators accepted between date fields. A date must use one consistently.
pub const DATE_SEPARATORS: [char; 3] = ['/', '-', '.'];

/// Clock layouts, tried in order. Each must consume the whole time token.
pub const TIME_LAYOUTS: &[&str] = &[
    "%H:%M",
    "%H:%M:%S",
    "%I:%M %p",
    "%I:%M:%S %p",
    "%I:%M%p",
    "%I:%M:%S%p",
];

/// Position of day, month and year inside a date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    /// month / day / year
    Mdy,
    /// day / month / year
    Dmy,
    /// year / month / day
    Ymd,
}

/// One date layout: a field order plus an exact year width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateLayout {
    pub order: FieldOrder,
    pub year_digits: usize,
    /// Human-readable form, e.g. `M/D/YY`
    pub label: &'static str,
}

impl DateLayout {
    const fn new(order: FieldOrder, year_digits: usize, label: &'static str) -> Self {
        Self {
            order,
            year_digits,
            label,
        }
    }

    /// Applies this layout to three numeric fields.
    fn apply(&self, fields: [&str; 3]) -> Option<NaiveDate> {
        let (year, month, day) = match self.order {
            FieldOrder::Mdy => (fields[2], fields[0], fields[1]),
            FieldOrder::Dmy => (fields[2], fields[1], fields[0]),
            FieldOrder::Ymd => (fields[0], fields[1], fields[2]),
        };

        if year.len() != self.year_digits || month.len() > 2 || day.len() > 2 {
            return None;
        }

        let year: i32 = year.parse().ok()?;
        let year = if self.year_digits == 2 {
            expand_two_digit_year(year)
        } else {
            year
        };

        NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
    }
}

const MONTH_FIRST_LAYOUTS: &[DateLayout] = &[
    DateLayout::new(FieldOrder::Mdy, 2, "M/D/YY"),
    DateLayout::new(FieldOrder::Mdy, 4, "M/D/YYYY"),
    DateLayout::new(FieldOrder::Dmy, 2, "D/M/YY"),
    DateLayout::new(FieldOrder::Dmy, 4, "D/M/YYYY"),
    DateLayout::new(FieldOrder::Ymd, 4, "YYYY/M/D"),
    DateLayout::new(FieldOrder::Ymd, 2, "YY/M/D"),
];

const DAY_FIRST_LAYOUTS: &[DateLayout] = &[
    DateLayout::new(FieldOrder::Dmy, 2, "D/M/YY"),
    DateLayout::new(FieldOrder::Dmy, 4, "D/M/YYYY"),
    DateLayout::new(FieldOrder::Mdy, 2, "M/D/YY"),
    DateLayout::new(FieldOrder::Mdy, 4, "M/D/YYYY"),
    DateLayout::new(FieldOrder::Ymd, 4, "YYYY/M/D"),
    DateLayout::new(FieldOrder::Ymd, 2, "YY/M/D"),
];

/// Returns the date layouts in the order they are attempted for `order`.
///
/// Any of [`DATE_SEPARATORS`] may stand in for `/` in the labels.
pub fn date_layouts(order: DateOrder) -> &'static [DateLayout] {
    match order {
        DateOrder::MonthFirst => MONTH_FIRST_LAYOUTS,
        DateOrder::DayFirst => DAY_FIRST_LAYOUTS,
    }
}

/// Same pivot as chrono's `%y`: 00-68 map to 2000-2068, 69-99 to 1969-1999.
fn expand_two_digit_year(year: i32) -> i32 {
    if year < 69 { 2000 + year } else { 1900 + year }
}

/// Collapses runs of whitespace into single ASCII spaces and trims the ends.
///
/// `split_whitespace` follows the Unicode White_Space property, so the
/// no-break spaces exporters put before AM/PM (U+00A0, U+202F, U+2007) are
/// folded as well.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn split_date(token: &str) -> Option<[&str; 3]> {
    let sep = token.chars().find(|c| !c.is_ascii_digit())?;
    if !DATE_SEPARATORS.contains(&sep) {
        return None;
    }

    let mut parts = token.split(sep);
    let fields = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }

    fields
        .iter()
        .all(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
        .then_some(fields)
}

/// Parses a date token using the layout priority for `order`.
pub fn parse_date(token: &str, order: DateOrder) -> Option<NaiveDate> {
    let token = normalize_whitespace(token);
    let fields = split_date(&token)?;
    date_layouts(order)
        .iter()
        .find_map(|layout| layout.apply(fields))
}

/// Parses a clock token in 24h or 12h form, with optional seconds.
pub fn parse_time(token: &str) -> Option<NaiveTime> {
    let token = normalize_whitespace(token);
    TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveTime::parse_from_str(&token, layout).ok())
}

/// Converts a header's date and time tokens into a timestamp.
///
/// A missing time token means midnight.
///
/// # Example
///
/// ```rust
/// use chatstat::config::DateOrder;
/// use chatstat::parsing::normalize_timestamp;
///
/// let ts = normalize_timestamp("1/2/23", Some("9:00\u{202f}AM"), DateOrder::MonthFirst)?;
/// assert_eq!(ts.to_string(), "2023-01-02 09:00:00");
///
/// let ts = normalize_timestamp("1/2/23", Some("9:00 AM"), DateOrder::DayFirst)?;
/// assert_eq!(ts.to_string(), "2023-02-01 09:00:00");
/// # Ok::<(), chatstat::error::LineError>(())
/// ```
pub fn normalize_timestamp(
    date: &str,
    time: Option<&str>,
    order: DateOrder,
) -> Result<NaiveDateTime, LineError> {
    let unrecognized = || {
        let joined = match time {
            Some(t) => format!("{date} {t}"),
            None => date.to_string(),
        };
        LineError::unrecognized(normalize_whitespace(&joined))
    };

    let day = parse_date(date, order).ok_or_else(unrecognized)?;
    let clock = match time {
        Some(t) if !t.trim().is_empty() => parse_time(t).ok_or_else(unrecognized)?,
        _ => NaiveTime::MIN,
    };

    Ok(day.and_time(clock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_month_first_default_example() {
        let ts = normalize_timestamp("1/2/23", Some("9:00 AM"), DateOrder::MonthFirst).unwrap();
        assert_eq!(ts, dt(2023, 1, 2, 9, 0, 0));
    }

    #[test]
    fn test_ambiguous_date_follows_policy() {
        let mf = parse_date("03/04/25", DateOrder::MonthFirst).unwrap();
        let df = parse_date("03/04/25", DateOrder::DayFirst).unwrap();
        assert_eq!(mf, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(df, NaiveDate::from_ymd_opt(2025, 4, 3).unwrap());
    }

    #[test]
    fn test_out_of_range_forces_other_order() {
        // 13 cannot be a month, so month-first falls through to D/M/Y
        let date = parse_date("13/04/25", DateOrder::MonthFirst).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 4, 13).unwrap());

        let date = parse_date("04/13/25", DateOrder::DayFirst).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 4, 13).unwrap());
    }

    #[test]
    fn test_year_width_is_exact() {
        // A two-digit year is never read as year 23 AD
        assert_eq!(
            parse_date("1/2/23", DateOrder::MonthFirst),
            NaiveDate::from_ymd_opt(2023, 1, 2)
        );
        assert_eq!(
            parse_date("1/2/2023", DateOrder::MonthFirst),
            NaiveDate::from_ymd_opt(2023, 1, 2)
        );
        assert!(parse_date("1/2/023", DateOrder::MonthFirst).is_none());
        assert!(parse_date("1/2/20234", DateOrder::MonthFirst).is_none());
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(parse_date("1/1/68", DateOrder::MonthFirst).unwrap().year(), 2068);
        assert_eq!(parse_date("1/1/69", DateOrder::MonthFirst).unwrap().year(), 1969);
    }

    #[test]
    fn test_year_first() {
        let date = parse_date("2023-01-02", DateOrder::MonthFirst).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        let date = parse_date("2023/12/31", DateOrder::DayFirst).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_separators() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_date("15/01/2024", DateOrder::DayFirst), expected);
        assert_eq!(parse_date("15-01-2024", DateOrder::DayFirst), expected);
        assert_eq!(parse_date("15.01.24", DateOrder::DayFirst), expected);
        // mixed separators are rejected
        assert!(parse_date("15/01-2024", DateOrder::DayFirst).is_none());
        assert!(parse_date("15 01 2024", DateOrder::DayFirst).is_none());
    }

    #[test]
    fn test_rejects_partial_matches() {
        assert!(parse_date("1/2", DateOrder::MonthFirst).is_none());
        assert!(parse_date("1/2/23/4", DateOrder::MonthFirst).is_none());
        assert!(parse_date("1/2/23x", DateOrder::MonthFirst).is_none());
        assert!(parse_date("", DateOrder::MonthFirst).is_none());
        assert!(parse_time("9:00 AM extra").is_none());
        assert!(parse_time("13:00 PM").is_none());
        assert!(parse_time("25:00").is_none());
    }

    #[test]
    fn test_clock_variants() {
        let nine = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(parse_time("09:05"), Some(nine));
        assert_eq!(parse_time("9:05"), Some(nine));
        assert_eq!(parse_time("9:05 AM"), Some(nine));
        assert_eq!(parse_time("9:05AM"), Some(nine));
        assert_eq!(parse_time("9:05 am"), Some(nine));
        assert_eq!(parse_time("9:05\u{202f}AM"), Some(nine));
        assert_eq!(parse_time("9:05\u{a0}\u{a0}AM"), Some(nine));
        assert_eq!(parse_time("9:05:30 PM"), NaiveTime::from_hms_opt(21, 5, 30));
        assert_eq!(parse_time("12:00 AM"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_time("12:00 PM"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_time("23:59:59"), NaiveTime::from_hms_opt(23, 59, 59));
    }

    #[test]
    fn test_missing_time_defaults_to_midnight() {
        let ts = normalize_timestamp("2/1/2023", None, DateOrder::MonthFirst).unwrap();
        assert_eq!(ts, dt(2023, 2, 1, 0, 0, 0));
        let ts = normalize_timestamp("2/1/2023", Some("  "), DateOrder::MonthFirst).unwrap();
        assert_eq!(ts, dt(2023, 2, 1, 0, 0, 0));
    }

    #[test]
    fn test_unrecognized_format_carries_input() {
        let err = normalize_timestamp("32/13/2023", Some("9:00\u{202f}AM"), DateOrder::MonthFirst)
            .unwrap_err();
        assert_eq!(err, LineError::unrecognized("32/13/2023 9:00 AM"));

        let err = normalize_timestamp("1/2/23", Some("nine o'clock"), DateOrder::MonthFirst)
            .unwrap_err();
        assert!(matches!(err, LineError::UnrecognizedFormat { .. }));
    }

    #[test]
    fn test_every_layout_roundtrips() {
        // Day 25 keeps D/M and M/D unambiguous under either policy
        let expected = dt(2024, 3, 25, 14, 7, 0);
        let date_formats = [
            "%-m/%-d/%y",
            "%m/%d/%Y",
            "%-d/%-m/%y",
            "%d/%m/%Y",
            "%Y/%m/%d",
            "%m-%d-%y",
            "%d-%m-%Y",
            "%d.%m.%y",
            "%Y-%m-%d",
        ];
        let time_formats = ["%H:%M", "%-I:%M %p", "%I:%M%p"];

        for order in [DateOrder::MonthFirst, DateOrder::DayFirst] {
            for date_fmt in date_formats {
                for time_fmt in time_formats {
                    let date = expected.format(date_fmt).to_string();
                    let time = expected.format(time_fmt).to_string();
                    let parsed = normalize_timestamp(&date, Some(&time), order);
                    assert_eq!(parsed, Ok(expected), "{date} {time} under {order}");
                }
            }
        }
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  9:00\u{202f}\u{a0} AM "), "9:00 AM");
        assert_eq!(normalize_whitespace("a\t\tb"), "a b");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_layout_lists_cover_both_policies() {
        assert_eq!(date_layouts(DateOrder::MonthFirst)[0].order, FieldOrder::Mdy);
        assert_eq!(date_layouts(DateOrder::DayFirst)[0].order, FieldOrder::Dmy);
        assert_eq!(
            date_layouts(DateOrder::MonthFirst).len(),
            date_layouts(DateOrder::DayFirst).len()
        );
    }
}
