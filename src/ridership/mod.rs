//! Ridership tables exported by the agency's reporting site.
//!
//! Each rail line has one table of boarding counts by category and date. This
//! module reads those tables, checks that the requested reporting period is
//! one the site publishes, and turns each line's share of system-wide
//! boardings into [`RouteWeights`](crate::config::RouteWeights).

pub mod period;
pub mod share;
pub mod types;

pub use period::ReportingPeriod;
pub use share::{line_shares, route_weights_from_shares};
pub use types::{LineShare, RidershipTable};
