//! Data types used by the ridership pipeline.

use serde::Serialize;
use std::io::Read;

use crate::error::RidershipError;

pub const CATEGORY_COLUMN: &str = "Boarding Category";
pub const TOTAL_BOARDINGS: &str = "Total Boardings";

/// Boarding counts for one rail line: one row per boarding category, one
/// column per reporting date.
#[derive(Debug, Clone, PartialEq)]
pub struct RidershipTable {
    pub(crate) line: String,
    pub(crate) periods: Vec<String>,
    pub(crate) rows: Vec<(String, Vec<Option<u64>>)>,
}

impl RidershipTable {
    /// Reads an exported table whose first column is `Boarding Category`.
    ///
    /// Counts may use thousands separators; blank or absent cells are
    /// missing values.
    pub fn from_reader<R: Read>(line: &str, reader: R) -> Result<Self, RidershipError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.get(0) != Some(CATEGORY_COLUMN) {
            return Err(RidershipError::MissingColumn(line.to_string()));
        }
        let periods: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let category = record.get(0).unwrap_or_default().to_string();
            let counts = (0..periods.len())
                .map(|col| parse_count(line, &category, record.get(col + 1).unwrap_or_default()))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push((category, counts));
        }

        Ok(Self {
            line: line.to_string(),
            periods,
            rows,
        })
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn row(&self, category: &str) -> Option<&[Option<u64>]> {
        self.rows
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, counts)| counts.as_slice())
    }

    /// The `Total Boardings` row.
    pub fn total_boardings(&self) -> Result<&[Option<u64>], RidershipError> {
        self.row(TOTAL_BOARDINGS)
            .ok_or_else(|| RidershipError::NoRidershipData(self.line.clone()))
    }
}

fn parse_count(line: &str, category: &str, cell: &str) -> Result<Option<u64>, RidershipError> {
    let digits: String = cell.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| RidershipError::BadCount {
            line: line.to_string(),
            category: category.to_string(),
            value: cell.to_string(),
        })
}

/// A line's proportion of system-wide boardings for each reporting date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineShare {
    pub line: String,
    pub periods: Vec<String>,
    pub shares: Vec<Option<f64>>,
}

impl LineShare {
    /// Share in the right-most column that has one; tables list dates
    /// oldest first.
    pub fn latest(&self) -> Option<f64> {
        self.shares.iter().rev().find_map(|s| *s)
    }
}
