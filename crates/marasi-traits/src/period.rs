//! Canonical quarterly periods and heterogeneous label parsing.
//!
//! Upstream datasets label their periods in several incompatible ways:
//! fiscal-quarter strings (`"2023Q3"`, `"Q3-2023"`), ISO-8601 dates or
//! date-times, and bare years for annual series. This module normalizes all
//! of them onto a single [`Quarter`] axis so that differently-formatted
//! labels denoting the same calendar quarter compare equal.

use crate::error::{MarasiError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Years accepted as period labels. Anything outside this window is far
/// more likely a malformed label than a real observation.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2999;

/// A canonical quarterly timestamp: a (year, quarter 1-4) pair.
///
/// `Quarter` is the uniform time axis every raw series is resampled onto.
/// Ordering is chronological (derived from the field order), and two labels
/// that denote the same calendar quarter always normalize to equal values.
///
/// # Example
///
/// ```
/// use marasi_traits::Quarter;
///
/// let q = Quarter::new(2023, 3).unwrap();
/// assert_eq!(q.to_string(), "2023Q3");
/// assert!(q < Quarter::new(2024, 1).unwrap());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Quarter {
    year: i32,
    quarter: u8,
}

impl Quarter {
    /// Creates a quarter, validating that `quarter` is in 1..=4.
    ///
    /// # Errors
    ///
    /// Returns [`MarasiError::PeriodParse`] if the quarter digit is out of
    /// range.
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(MarasiError::PeriodParse(format!(
                "quarter must be 1-4, got {quarter}"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// The calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The quarter number (1-4).
    #[must_use]
    pub const fn quarter(&self) -> u8 {
        self.quarter
    }

    /// Maps a calendar date to the quarter containing it.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as u8,
        }
    }

    /// The quarter immediately after this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }

    /// Builds the full gap-free quarterly index from `start` to `end`
    /// inclusive. Returns an empty vector when `start > end`.
    #[must_use]
    pub fn span(start: Self, end: Self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = start;
        while current <= end {
            out.push(current);
            current = current.next();
        }
        out
    }

    /// Number of quarters from `start` to `end` inclusive.
    #[must_use]
    pub const fn quarters_between(start: Self, end: Self) -> usize {
        let a = start.year as i64 * 4 + start.quarter as i64;
        let b = end.year as i64 * 4 + end.quarter as i64;
        if b < a { 0 } else { (b - a + 1) as usize }
    }

    /// The canonical `"YYYYQn"` label for this quarter.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}Q{}", self.year, self.quarter)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

/// A parsed period label: either one specific quarter or a bare year.
///
/// Annual series carry year-only labels; for quarterly alignment a year
/// fans out to its four quarters, each carrying the same observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsedPeriod {
    /// A single canonical quarter.
    Quarter(Quarter),
    /// A bare year, standing for all four of its quarters.
    Year(i32),
}

impl ParsedPeriod {
    /// The quarters this period stands for: one for a quarter label, four
    /// for a bare year.
    #[must_use]
    pub fn quarters(&self) -> Vec<Quarter> {
        match *self {
            Self::Quarter(q) => vec![q],
            Self::Year(year) => (1..=4)
                .map(|quarter| Quarter { year, quarter })
                .collect(),
        }
    }

    /// Parses a period out of a raw JSON field value.
    ///
    /// Strings go through [`parse_period`]; integer values are treated as
    /// bare years (annual series frequently store the year as a number).
    ///
    /// # Errors
    ///
    /// Returns [`MarasiError::PeriodParse`] for null, non-integer numbers,
    /// out-of-range years, and unparsable strings.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => parse_period(s),
            Value::Number(n) => {
                let year = n
                    .as_i64()
                    .ok_or_else(|| MarasiError::PeriodParse(format!("non-integer period {n}")))?;
                let year = i32::try_from(year)
                    .map_err(|_| MarasiError::PeriodParse(format!("year out of range: {year}")))?;
                if !YEAR_RANGE.contains(&year) {
                    return Err(MarasiError::PeriodParse(format!(
                        "year out of range: {year}"
                    )));
                }
                Ok(Self::Year(year))
            }
            other => Err(MarasiError::PeriodParse(format!(
                "unsupported period value: {other}"
            ))),
        }
    }
}

/// Parses a heterogeneous period label into a [`ParsedPeriod`].
///
/// Accepted shapes, tried in order:
///
/// - `"YYYYQn"`: four-digit year directly followed by `Q` and a digit 1-4
/// - `"Qn-YYYY"`: quarter-then-year, dash separated
/// - bare four-digit years (annual series)
/// - ISO-8601 dates and date-times, mapped to the containing quarter
///
/// # Errors
///
/// Returns [`MarasiError::PeriodParse`] for empty labels, quarter digits
/// outside 1-4, malformed years, and anything else unrecognized. The
/// specified policy is for the caller to drop such records, never to coerce
/// them to a default period.
///
/// # Example
///
/// ```
/// use marasi_traits::{parse_period, ParsedPeriod, Quarter};
///
/// let q3 = ParsedPeriod::Quarter(Quarter::new(2023, 3).unwrap());
/// assert_eq!(parse_period("2023Q3").unwrap(), q3);
/// assert_eq!(parse_period("Q3-2023").unwrap(), q3);
/// assert_eq!(parse_period("2023-08-15").unwrap(), q3);
/// ```
pub fn parse_period(label: &str) -> Result<ParsedPeriod> {
    let s = label.trim();
    if s.is_empty() {
        return Err(MarasiError::PeriodParse("empty period label".to_string()));
    }

    if let Some(quarter) = parse_compact_quarter(s)? {
        return Ok(ParsedPeriod::Quarter(quarter));
    }
    if let Some(quarter) = parse_dashed_quarter(s)? {
        return Ok(ParsedPeriod::Quarter(quarter));
    }
    if let Some(year) = parse_bare_year(s) {
        return Ok(ParsedPeriod::Year(year));
    }
    if let Some(date) = parse_iso_date(s) {
        return Ok(ParsedPeriod::Quarter(Quarter::from_date(date)));
    }

    Err(MarasiError::PeriodParse(label.to_string()))
}

/// `"YYYYQn"`: four digits, `Q`, one digit. Returns `Ok(None)` when the
/// shape does not match at all, so the next format can be tried; a matching
/// shape with a bad quarter digit is a hard parse error.
fn parse_compact_quarter(s: &str) -> Result<Option<Quarter>> {
    let bytes = s.as_bytes();
    if bytes.len() != 6 || !(bytes[4] == b'Q' || bytes[4] == b'q') {
        return Ok(None);
    }
    let Ok(year) = s[..4].parse::<i32>() else {
        return Ok(None);
    };
    let quarter = quarter_digit(&s[5..])?;
    check_year(year)?;
    Ok(Some(Quarter { year, quarter }))
}

/// `"Qn-YYYY"`: `Q`, one digit, dash, four digits.
fn parse_dashed_quarter(s: &str) -> Result<Option<Quarter>> {
    let bytes = s.as_bytes();
    if bytes.len() != 7 || !(bytes[0] == b'Q' || bytes[0] == b'q') || bytes[2] != b'-' {
        return Ok(None);
    }
    let Ok(year) = s[3..].parse::<i32>() else {
        return Ok(None);
    };
    let quarter = quarter_digit(&s[1..2])?;
    check_year(year)?;
    Ok(Some(Quarter { year, quarter }))
}

fn parse_bare_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i32>().ok().filter(|y| YEAR_RANGE.contains(y))
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}

fn quarter_digit(s: &str) -> Result<u8> {
    let digit = s
        .parse::<u8>()
        .map_err(|_| MarasiError::PeriodParse(format!("bad quarter digit '{s}'")))?;
    if !(1..=4).contains(&digit) {
        return Err(MarasiError::PeriodParse(format!(
            "quarter must be 1-4, got {digit}"
        )));
    }
    Ok(digit)
}

fn check_year(year: i32) -> Result<()> {
    if YEAR_RANGE.contains(&year) {
        Ok(())
    } else {
        Err(MarasiError::PeriodParse(format!(
            "year out of range: {year}"
        )))
    }
}
