use tracing::{debug, warn};

use crate::config::RouteWeights;
use crate::error::RidershipError;
use crate::ridership::types::{LineShare, RidershipTable};

/// Divides each line's total boardings by the system-wide total, column by
/// column. Columns are matched by date label; a missing or zero system total
/// leaves that share empty.
///
/// Lines without a `Total Boardings` row are skipped with a warning.
///
/// # Errors
///
/// [`RidershipError::NoRidershipData`] if the system table has no totals.
pub fn line_shares(
    system: &RidershipTable,
    lines: &[RidershipTable],
) -> Result<Vec<LineShare>, RidershipError> {
    let system_totals = system.total_boardings()?;

    let mut shares = Vec::with_capacity(lines.len());
    for table in lines {
        let totals = match table.total_boardings() {
            Ok(totals) => totals,
            Err(e) => {
                warn!(line = table.line(), error = %e, "Skipping line without totals");
                continue;
            }
        };

        let column_shares = table
            .periods()
            .iter()
            .zip(totals)
            .map(|(period, line_total)| {
                let col = system.periods().iter().position(|p| p == period)?;
                let system_total = system_totals[col].filter(|t| *t > 0)?;
                line_total.map(|t| t as f64 / system_total as f64)
            })
            .collect();

        shares.push(LineShare {
            line: table.line().to_string(),
            periods: table.periods().to_vec(),
            shares: column_shares,
        });
    }

    debug!(lines = shares.len(), "Line shares computed");
    Ok(shares)
}

/// Builds route weights from each line's latest share. `routes` pairs a line
/// name with its route number; lines with no share are left out.
pub fn route_weights_from_shares(
    shares: &[LineShare],
    routes: &[(String, String)],
) -> RouteWeights {
    let mut weights = RouteWeights::default();

    for (line, route) in routes {
        let latest = shares
            .iter()
            .find(|s| s.line.eq_ignore_ascii_case(line))
            .and_then(LineShare::latest);
        match latest {
            Some(share) => weights.insert(route.clone(), share),
            None => warn!(line, route, "No ridership share for line"),
        }
    }

    weights
}
