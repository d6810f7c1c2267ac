use std::fmt;

use crate::error::{ComputeError, Result};

/// Years accepted for any period.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, ordered year first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Builds a period, rejecting months outside 1..=12 and years outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: i32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ComputeError::validation(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(ComputeError::validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self {
            year,
            month: month as u32,
        })
    }

    /// The following month, `None` past the last representable year.
    pub fn next(self) -> Option<Self> {
        if self.month == 12 {
            Some(Self {
                year: self.year.checked_add(1)?,
                month: 1,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    /// Month as stored in the database.
    pub fn month_i32(self) -> i32 {
        self.month as i32
    }

    /// Slot key used to match existing rows, e.g. `2025-3`.
    pub fn slot_key(self) -> String {
        format!("{}-{}", self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Every month from `start` to `end`, both included.
pub fn month_range(start: YearMonth, end: YearMonth) -> Result<Vec<YearMonth>> {
    if end < start {
        return Err(ComputeError::validation(format!(
            "end period {end} is before start period {start}"
        )));
    }

    let mut months = Vec::new();
    let mut current = Some(start);
    while let Some(month) = current.filter(|m| *m <= end) {
        months.push(month);
        current = month.next();
    }
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: i32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_range_rolls_over_year() {
        let months = month_range(ym(2024, 11), ym(2025, 2)).unwrap();
        assert_eq!(months, vec![ym(2024, 11), ym(2024, 12), ym(2025, 1), ym(2025, 2)]);
    }

    #[test]
    fn test_single_month_range() {
        assert_eq!(month_range(ym(2025, 5), ym(2025, 5)).unwrap(), vec![ym(2025, 5)]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = month_range(ym(2025, 6), ym(2025, 3)).unwrap_err();
        assert!(matches!(err, ComputeError::Validation(_)));
    }

    #[test]
    fn test_multi_year_range_length() {
        assert_eq!(month_range(ym(2020, 1), ym(2024, 12)).unwrap().len(), 60);
    }

    #[test]
    fn test_month_bounds() {
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 13).is_err());
        assert!(YearMonth::new(2025, 12).is_ok());
    }

    #[test]
    fn test_year_bounds() {
        assert!(YearMonth::new(MIN_YEAR, 1).is_ok());
        assert!(YearMonth::new(MAX_YEAR, 12).is_ok());
        assert!(YearMonth::new(0, 1).is_err());
        assert!(YearMonth::new(MAX_YEAR + 1, 1).is_err());
        assert!(YearMonth::new(i32::MAX, 12).is_err());
    }

    #[test]
    fn test_range_ends_at_last_representable_month() {
        let last = YearMonth { year: i32::MAX, month: 12 };
        assert_eq!(last.next(), None);
        assert_eq!(month_range(last, last).unwrap(), vec![last]);

        let months = month_range(ym(MAX_YEAR, 11), ym(MAX_YEAR, 12)).unwrap();
        assert_eq!(months.len(), 2);
    }

    #[test]
    fn test_ordering_and_formatting() {
        assert!(ym(2024, 12) < ym(2025, 1));
        assert_eq!(ym(2025, 3).slot_key(), "2025-3");
        assert_eq!(ym(2025, 3).to_string(), "2025-03");
        assert_eq!(ym(2025, 12).next(), Some(ym(2026, 1)));
    }
}
