//! # Session Dates
//!
//! A program-local calendar day, used as the third component of the
//! attendance upsert key. All validation is pure and explicit; the
//! module never reads a clock.
//!
//! ## Format
//!
//! Dates parse from and render to `YYYY-MM-DD`. Validation applies
//! the Gregorian rules (month 1–12, day valid for the month,
//! leap-year February).
//!
//! ## Ordering
//!
//! `SessionDate` derives `Ord` over `(year, month, day)`, so sorted
//! listings are chronological.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Days per month in a non-leap year, indexed by `month - 1`.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar day in the program's local timezone.
///
/// Field order matters: the derived `Ord` compares year, then month,
/// then day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionDate {
    year: u16,
    month: u8,
    day: u8,
}

impl SessionDate {
    /// Validates and constructs a date.
    ///
    /// ## Errors
    ///
    /// `RosterError::Validation` if the month is outside 1–12 or the
    /// day is outside the month's length (February 29 is accepted
    /// only in leap years).
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, RosterError> {
        if month == 0 || month > 12 {
            return Err(RosterError::Validation(format!("invalid month: {month}")));
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return Err(RosterError::Validation(format!(
                "invalid day {day} for {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Year component.
    #[must_use]
    #[inline]
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Month component (1–12).
    #[must_use]
    #[inline]
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day component (1–31).
    #[must_use]
    #[inline]
    pub fn day(&self) -> u8 {
        self.day
    }
}

/// Returns the number of days in the given month, applying the
/// Gregorian leap rule for February.
fn days_in_month(year: u16, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    }
}

/// Gregorian leap rule: divisible by 4, except centuries not
/// divisible by 400.
fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

impl fmt::Display for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for SessionDate {
    type Err = RosterError;

    /// Parses `YYYY-MM-DD`. Rejects any other shape.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RosterError::Validation(format!("malformed date: '{s}'"));

        let mut parts = s.split('-');
        let (y, m, d) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d), None) => (y, m, d),
            _ => return Err(malformed()),
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(malformed());
        }
        let year: u16 = y.parse().map_err(|_| malformed())?;
        let month: u8 = m.parse().map_err(|_| malformed())?;
        let day: u8 = d.parse().map_err(|_| malformed())?;
        SessionDate::new(year, month, day)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert!(SessionDate::new(2025, 1, 31).is_ok());
        assert!(SessionDate::new(2025, 4, 30).is_ok());
        assert!(SessionDate::new(2025, 12, 1).is_ok());
    }

    #[test]
    fn test_invalid_month_and_day() {
        assert!(SessionDate::new(2025, 0, 1).is_err());
        assert!(SessionDate::new(2025, 13, 1).is_err());
        assert!(SessionDate::new(2025, 4, 31).is_err());
        assert!(SessionDate::new(2025, 1, 0).is_err());
        assert!(SessionDate::new(2025, 1, 32).is_err());
    }

    #[test]
    fn test_february_leap_rules() {
        // 2024: leap (divisible by 4, not a century)
        assert!(SessionDate::new(2024, 2, 29).is_ok());
        // 2025: not leap
        assert!(SessionDate::new(2025, 2, 29).is_err());
        // 1900: century not divisible by 400
        assert!(SessionDate::new(1900, 2, 29).is_err());
        // 2000: century divisible by 400
        assert!(SessionDate::new(2000, 2, 29).is_ok());
    }

    #[test]
    fn test_display_round_trip() {
        let date = SessionDate::new(2025, 3, 7).expect("valid date");
        assert_eq!(date.to_string(), "2025-03-07");
        let parsed: SessionDate = "2025-03-07".parse().expect("parses");
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("2025-3-07".parse::<SessionDate>().is_err());
        assert!("2025-03-07-01".parse::<SessionDate>().is_err());
        assert!("20250307".parse::<SessionDate>().is_err());
        assert!("2025-03-xx".parse::<SessionDate>().is_err());
        assert!("".parse::<SessionDate>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a: SessionDate = "2024-12-31".parse().expect("parses");
        let b: SessionDate = "2025-01-01".parse().expect("parses");
        let c: SessionDate = "2025-01-02".parse().expect("parses");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_accessors() {
        let date = SessionDate::new(2025, 6, 15).expect("valid date");
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }
}
