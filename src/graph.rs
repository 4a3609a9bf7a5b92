//! Station graph value types.
//!
//! A [`StationGraph`] is a [`NodeList`] fixing the dense index of every
//! station, plus a map of edge weights keyed by an unordered pair of those
//! indices. The adjacency matrix is derived from both on demand.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{RankError, Result};

/// Opaque station identifier. Its string form is the canonical one used by
/// route filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for StationId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Ordered, duplicate-free sequence of stations. Position in the list is the
/// index used by every matrix and vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeList {
    ids: Vec<StationId>,
    positions: HashMap<StationId, usize>,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless it is already present; returns its position.
    pub fn insert(&mut self, id: StationId) -> usize {
        if let Some(&pos) = self.positions.get(&id) {
            return pos;
        }
        let pos = self.ids.len();
        self.positions.insert(id.clone(), pos);
        self.ids.push(id);
        pos
    }

    pub fn position(&self, id: &StationId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn get(&self, index: usize) -> Option<&StationId> {
        self.ids.get(index)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[StationId] {
        &self.ids
    }
}

impl<S: Into<StationId>> FromIterator<S> for NodeList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = NodeList::new();
        for id in iter {
            list.insert(id.into());
        }
        list
    }
}

/// Unordered pair of node indices; `lo <= hi` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    lo: usize,
    hi: usize,
}

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }
}

/// Undirected, weighted station network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationGraph {
    nodes: NodeList,
    edges: BTreeMap<EdgeKey, f64>,
}

impl StationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with a fixed node order and no edges.
    pub fn with_nodes(nodes: NodeList) -> Self {
        Self {
            nodes,
            edges: BTreeMap::new(),
        }
    }

    /// Adds a station; existing stations keep their position.
    pub fn add_node(&mut self, id: impl Into<StationId>) -> usize {
        self.nodes.insert(id.into())
    }

    /// Adds or replaces the edge between two stations, inserting either
    /// endpoint that is not yet known.
    pub fn add_edge(
        &mut self,
        a: impl Into<StationId>,
        b: impl Into<StationId>,
        weight: f64,
    ) -> Result<()> {
        let (a, b) = (a.into(), b.into());
        if !weight.is_finite() {
            return Err(RankError::InvalidWeight {
                from: a,
                to: b,
                weight,
            });
        }
        let i = self.nodes.insert(a);
        let j = self.nodes.insert(b);
        self.edges.insert(EdgeKey::new(i, j), weight);
        Ok(())
    }

    pub(crate) fn set_weight(&mut self, key: EdgeKey, weight: f64) {
        self.edges.insert(key, weight);
    }

    pub fn nodes(&self) -> &NodeList {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn weight(&self, a: &StationId, b: &StationId) -> Option<f64> {
        let i = self.nodes.position(a)?;
        let j = self.nodes.position(b)?;
        self.edges.get(&EdgeKey::new(i, j)).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.edges.iter().map(|(k, w)| (*k, *w))
    }

    /// Edge weights in key order.
    pub fn weights(&self) -> Vec<f64> {
        self.edges.values().copied().collect()
    }

    /// Dense symmetric adjacency matrix aligned with the node list.
    pub fn adjacency_matrix(&self) -> Array2<f64> {
        let n = self.nodes.len();
        let mut adj = Array2::zeros((n, n));

        for (key, &w) in &self.edges {
            let (i, j) = key.endpoints();
            adj[[i, j]] = w;
            adj[[j, i]] = w;
        }

        adj
    }
}
