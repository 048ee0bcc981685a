//! # Errors
//!
//! $$
//! \text{run} \mapsto \text{Ok} \ \vert\ \text{fatal data/input error}
//! $$
//!
//! Fatal error taxonomy for estimation and optimization. Interactive entry
//! mistakes are handled locally by the allocation loop and never reach this
//! type; per-target solver non-convergence is not an error at all.

use thiserror::Error;

/// Fatal errors raised by the estimator, the frontier solver and the
/// allocation arithmetic.
#[derive(Debug, Error)]
pub enum FrontierError {
  /// A ticker's price history is too short to produce return statistics.
  #[error("insufficient price history for {ticker}: {observations} usable observation(s)")]
  DataInsufficient { ticker: String, observations: usize },

  /// Structurally invalid numeric input (shape mismatch, bad matrix, ...).
  #[error("invalid input: {0}")]
  InvalidInput(String),
}
