use chrono::Month;
use std::fmt;

use crate::error::RidershipError;

pub const FIRST_YEAR: i32 = 2009;
pub const LAST_YEAR: i32 = 2023;
/// Latest month published for [`LAST_YEAR`].
pub const LAST_MONTH: Month = Month::October;

/// A month and year for which ridership tables are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    month: Month,
    year: i32,
}

impl ReportingPeriod {
    /// Validates an English month name (`"March"`, `"mar"`) and a year.
    pub fn new(month: &str, year: i32) -> Result<Self, RidershipError> {
        let month: Month = month
            .trim()
            .parse()
            .map_err(|_| RidershipError::Period(format!("unknown month {month:?}")))?;

        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(RidershipError::Period(format!(
                "year must be between {FIRST_YEAR} and {LAST_YEAR}, got {year}"
            )));
        }
        if year == LAST_YEAR && month.number_from_month() > LAST_MONTH.number_from_month() {
            return Err(RidershipError::Period(format!(
                "month must be {} or earlier for the year {LAST_YEAR}",
                LAST_MONTH.name()
            )));
        }

        Ok(Self { month, year })
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// File name of an exported table, e.g. `gvRailRedMarch2023.csv`.
    pub fn table_file_name(&self, line: &str) -> String {
        format!("{line}{}{}.csv", self.month.name(), self.year)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}
