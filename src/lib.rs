//! Station importance ranking for metro rail networks.
//!
//! A station graph is (optionally) reweighted by route ridership and
//! normalized, then relative label propagation scores every station by the
//! decayed path mass reaching it from a set of target stations.

pub mod config;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod index;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod ranking;
pub mod ridership;
pub mod rlp;
pub mod stats;

pub use error::{RankError, RidershipError};
pub use graph::{EdgeKey, NodeList, StationGraph, StationId};
pub use index::{index_to_station_id, indicator_vector, route_id, station_id_to_index};
pub use normalize::normalize_graph;
pub use ranking::{RankedStation, get_ranked_stations, ranked_scores};
pub use rlp::{RlpConfig, rlp};
