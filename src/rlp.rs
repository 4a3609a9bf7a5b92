//! Relative label propagation.
//!
//! Scores every station by the weighted path mass reaching it from a set of
//! target stations, summed over path lengths `1..=max_hops` with a geometric
//! decay:
//!
//! ```text
//! s = Σ_{l=1}^{L} ε^(l-1) · (f · A^l)
//! ```
//!
//! The hop term `f · A^l` is carried forward as `(f · A^(l-1)) · A` in a
//! pair of working vectors, so each hop costs one vector-matrix product.

use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{RankError, Result};

/// Decay and horizon for [`rlp`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RlpConfig {
    pub epsilon: f64,
    pub max_hops: usize,
}

impl Default for RlpConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.5,
            max_hops: 3,
        }
    }
}

impl RlpConfig {
    pub fn run(&self, f: &Array1<f64>, adjacency: &Array2<f64>) -> Result<Array1<f64>> {
        rlp(f, adjacency, self.epsilon, self.max_hops)
    }
}

/// Computes the propagated importance of every node.
///
/// `f` is the target indicator vector and `adjacency` the N×N weighted
/// adjacency matrix in node-list order. The result is not normalized; its
/// scale follows the scale of `adjacency`.
///
/// # Errors
///
/// - [`RankError::DimensionMismatch`] if `adjacency` is not square or `f`
///   does not match its size.
/// - [`RankError::InvalidParameter`] if `epsilon` is not a positive finite
///   number or `max_hops` is zero.
/// - [`RankError::NumericInstability`] as soon as a hop produces NaN or
///   infinity.
#[tracing::instrument(skip(f, adjacency), fields(nodes = f.len()))]
pub fn rlp(
    f: &Array1<f64>,
    adjacency: &Array2<f64>,
    epsilon: f64,
    max_hops: usize,
) -> Result<Array1<f64>> {
    let (rows, cols) = adjacency.dim();
    if rows != cols {
        return Err(RankError::DimensionMismatch {
            what: "adjacency matrix columns",
            expected: rows,
            found: cols,
        });
    }
    if f.len() != rows {
        return Err(RankError::DimensionMismatch {
            what: "indicator vector length",
            expected: rows,
            found: f.len(),
        });
    }
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(RankError::InvalidParameter(format!(
            "epsilon must be a positive finite number, got {epsilon}"
        )));
    }
    if max_hops == 0 {
        return Err(RankError::InvalidParameter(
            "max_hops must be at least 1".to_string(),
        ));
    }

    // f · A == Aᵀ · f
    let transposed = adjacency.t();
    let mut scores = Array1::<f64>::zeros(rows);
    let mut term = f.clone();
    let mut next = Array1::<f64>::zeros(rows);
    let mut decay = 1.0;

    for hop in 1..=max_hops {
        general_mat_vec_mul(1.0, &transposed, &term, 0.0, &mut next);
        std::mem::swap(&mut term, &mut next);

        if !term.iter().all(|v| v.is_finite()) {
            return Err(RankError::NumericInstability { hop });
        }
        scores.scaled_add(decay, &term);
        if !scores.iter().all(|v| v.is_finite()) {
            return Err(RankError::NumericInstability { hop });
        }
        trace!(hop, decay, "Hop accumulated");

        decay *= epsilon;
    }

    debug!(
        max_hops,
        epsilon,
        reached = scores.iter().filter(|v| **v != 0.0).count(),
        "Propagation complete"
    );
    Ok(scores)
}
