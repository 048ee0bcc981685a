//! # Efficient Frontier Solver
//!
//! $$
//! \min_{\mathbf w \in \Delta^{n-1}} \sqrt{\mathbf w^\top \Sigma \mathbf w}
//! \quad \text{s.t.}\quad \mathbf w \cdot \mu = r^\*
//! $$
//!
//! Traces the minimum-variance frontier over a grid of target returns. The
//! budget and box constraints are enforced exactly through a softmax
//! reparameterization of the weights; the target-return equality enters the
//! objective as a quadratic penalty and a solve is accepted only when the
//! post-solve return residual is within tolerance. Targets near the edge of
//! the achievable range routinely fail that test and are skipped.

use argmin::core::CostFunction;
use argmin::core::Executor;
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;

use crate::error::FrontierError;

const SYMMETRY_TOL: f64 = 1e-8;

/// Solver configuration for one frontier sweep.
#[derive(Clone, Debug)]
pub struct FrontierConfig {
  /// Number of equally spaced target returns, both endpoints inclusive.
  pub grid_points: usize,
  /// Weight of the quadratic target-return penalty.
  pub return_penalty: f64,
  /// Largest accepted |w·mu - target| residual for a converged solve.
  pub return_tolerance: f64,
  /// Nelder-Mead standard-deviation tolerance.
  pub sd_tolerance: f64,
  /// Nelder-Mead iteration cap per target.
  pub max_iters: u64,
}

impl Default for FrontierConfig {
  fn default() -> Self {
    Self {
      grid_points: 100,
      return_penalty: 1e4,
      return_tolerance: 1e-3,
      sd_tolerance: 1e-10,
      max_iters: 10_000,
    }
  }
}

/// One converged point on the minimum-variance frontier.
#[derive(Clone, Debug)]
pub struct FrontierPoint {
  /// Target annualized return, achieved within tolerance.
  pub expected_return: f64,
  /// Portfolio standard deviation at the optimum.
  pub risk: f64,
  /// Optimal long-only weights, summing to one.
  pub weights: Vec<f64>,
}

fn softmax(x: &[f64]) -> Vec<f64> {
  if x.is_empty() {
    return Vec::new();
  }

  let max_x = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
  let exps: Vec<f64> = x.iter().map(|&v| (v - max_x).exp()).collect();
  let sum: f64 = exps.iter().sum();

  if sum < 1e-15 {
    vec![1.0 / x.len() as f64; x.len()]
  } else {
    exps.iter().map(|&e| e / sum).collect()
  }
}

/// Portfolio standard deviation `sqrt(w' Sigma w)`.
///
/// Negative quadratic-form values arising from numerical error are clamped
/// to zero before the square root.
pub fn portfolio_volatility(weights: &[f64], cov: &Array2<f64>) -> f64 {
  let w = ArrayView1::from(weights);
  w.dot(&cov.dot(&w)).max(0.0).sqrt()
}

struct MinVolCost {
  mu: Array1<f64>,
  cov: Array2<f64>,
  // captured by value per solve, one cost per grid target
  target_return: f64,
  penalty: f64,
}

impl CostFunction for MinVolCost {
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
    let w = softmax(x);
    let vol = portfolio_volatility(&w, &self.cov);
    let port_ret = ArrayView1::from(&w[..]).dot(&self.mu);

    Ok(vol + self.penalty * (port_ret - self.target_return).powi(2))
  }
}

fn validate_inputs(mu: &Array1<f64>, cov: &Array2<f64>) -> Result<(), FrontierError> {
  let n = mu.len();
  if n == 0 {
    return Err(FrontierError::InvalidInput(
      "mean return vector is empty".into(),
    ));
  }
  if mu.iter().any(|v| !v.is_finite()) {
    return Err(FrontierError::InvalidInput(
      "mean return vector contains non-finite entries".into(),
    ));
  }
  if cov.nrows() != cov.ncols() {
    return Err(FrontierError::InvalidInput(format!(
      "covariance matrix is not square: {}x{}",
      cov.nrows(),
      cov.ncols()
    )));
  }
  if cov.nrows() != n {
    return Err(FrontierError::InvalidInput(format!(
      "covariance dimension {} does not match {} assets",
      cov.nrows(),
      n
    )));
  }
  for i in 0..n {
    if !cov[[i, i]].is_finite() || cov[[i, i]] < 0.0 {
      return Err(FrontierError::InvalidInput(format!(
        "covariance diagonal entry {i} is negative or non-finite"
      )));
    }
    for j in (i + 1)..n {
      if (cov[[i, j]] - cov[[j, i]]).abs() > SYMMETRY_TOL {
        return Err(FrontierError::InvalidInput(format!(
          "covariance matrix is not symmetric at ({i}, {j})"
        )));
      }
    }
  }

  Ok(())
}

fn target_grid(lo: f64, hi: f64, points: usize) -> Vec<f64> {
  if points == 0 {
    return Vec::new();
  }
  if points == 1 {
    return vec![lo];
  }

  (0..points)
    .map(|k| lo + (hi - lo) * k as f64 / (points - 1) as f64)
    .collect()
}

fn solve_target(
  mu: &Array1<f64>,
  cov: &Array2<f64>,
  target: f64,
  config: &FrontierConfig,
) -> Option<Vec<f64>> {
  let n = mu.len();
  let cost = MinVolCost {
    mu: mu.clone(),
    cov: cov.clone(),
    target_return: target,
    penalty: config.return_penalty,
  };

  // x0 = zeros maps to the uniform 1/n initial portfolio under softmax
  let x0 = vec![0.0; n];
  let mut simplex = Vec::with_capacity(n + 1);
  simplex.push(x0.clone());
  for i in 0..n {
    let mut point = x0.clone();
    point[i] = 1.0;
    simplex.push(point);
  }

  let solver = NelderMead::new(simplex)
    .with_sd_tolerance(config.sd_tolerance)
    .ok()?;
  let result = Executor::new(cost, solver)
    .configure(|state| state.max_iters(config.max_iters))
    .run()
    .ok()?;

  let best = result.state.best_param?;
  let weights = softmax(&best);
  let achieved = ArrayView1::from(&weights[..]).dot(mu);
  if (achieved - target).abs() > config.return_tolerance {
    return None;
  }

  Some(weights)
}

/// Trace the minimum-variance frontier over a grid of target returns.
///
/// Targets for which the penalized solve does not reach the requested return
/// are excluded from the result; the output is ordered by non-decreasing
/// target return and has at most `config.grid_points` entries.
pub fn efficient_frontier(
  mu: &Array1<f64>,
  cov: &Array2<f64>,
  config: &FrontierConfig,
) -> Result<Vec<FrontierPoint>, FrontierError> {
  validate_inputs(mu, cov)?;

  let lo = mu.iter().cloned().fold(f64::INFINITY, f64::min);
  let hi = mu.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

  let mut points = Vec::with_capacity(config.grid_points);
  for target in target_grid(lo, hi, config.grid_points) {
    match solve_target(mu, cov, target, config) {
      Some(weights) => {
        let risk = portfolio_volatility(&weights, cov);
        points.push(FrontierPoint {
          expected_return: target,
          risk,
          weights,
        });
      }
      None => {
        tracing::debug!(target_return = target, "skipping infeasible target return");
      }
    }
  }

  Ok(points)
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;
  use ndarray::arr2;

  use super::*;

  fn quick_config(grid_points: usize) -> FrontierConfig {
    FrontierConfig {
      grid_points,
      ..FrontierConfig::default()
    }
  }

  #[test]
  fn volatility_is_nonnegative_for_valid_weights() {
    let cov = arr2(&[[0.04, 0.01], [0.01, 0.09]]);

    for w in [[1.0, 0.0], [0.0, 1.0], [0.5, 0.5], [0.3, 0.7]] {
      assert!(portfolio_volatility(&w, &cov) >= 0.0);
    }
  }

  #[test]
  fn volatility_clamps_negative_quadratic_form() {
    // symmetric with zero diagonal, indefinite by construction
    let cov = arr2(&[[0.0, -1.0], [-1.0, 0.0]]);

    assert_eq!(portfolio_volatility(&[0.5, 0.5], &cov), 0.0);
  }

  #[test]
  fn target_grid_includes_both_endpoints() {
    let grid = target_grid(0.05, 0.15, 100);

    assert_eq!(grid.len(), 100);
    assert!((grid[0] - 0.05).abs() < 1e-15);
    assert!((grid[99] - 0.15).abs() < 1e-15);
  }

  #[test]
  fn frontier_weights_sum_to_one_on_identity_cov() {
    let mu = arr1(&[0.05, 0.10, 0.15]);
    let cov = arr2(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    let points = efficient_frontier(&mu, &cov, &quick_config(3)).expect("valid inputs");
    let mid = points
      .iter()
      .find(|p| (p.expected_return - 0.10).abs() < 1e-12)
      .expect("interior target converges");

    let sum_w: f64 = mid.weights.iter().sum();
    assert!((sum_w - 1.0).abs() < 1e-6);
    assert!(mid.weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
  }

  #[test]
  fn frontier_targets_are_nondecreasing_and_bounded() {
    let mu = arr1(&[0.08, 0.12]);
    let cov = arr2(&[[0.04, 0.01], [0.01, 0.09]]);

    let points = efficient_frontier(&mu, &cov, &quick_config(25)).expect("valid inputs");

    assert!(points.len() <= 25);
    assert!(!points.is_empty());
    for pair in points.windows(2) {
      assert!(pair[1].expected_return >= pair[0].expected_return);
    }
    assert!(points.iter().all(|p| p.risk >= 0.0));
  }

  #[test]
  fn equal_return_assets_converge_at_their_common_return() {
    let mu = arr1(&[0.1, 0.1]);
    let cov = arr2(&[[0.04, 0.0], [0.0, 0.09]]);

    let points = efficient_frontier(&mu, &cov, &quick_config(5)).expect("valid inputs");

    assert!(!points.is_empty());
    for p in &points {
      assert!((p.expected_return - 0.1).abs() < 1e-12);
      assert!(p.risk >= 0.0);
    }
    // minimum variance tilts toward the lower-variance asset
    let best = &points[0];
    assert!(best.weights[0] > best.weights[1]);
  }

  #[test]
  fn rejects_empty_mean_vector() {
    let mu = arr1(&[]);
    let cov = Array2::<f64>::zeros((0, 0));

    let err = efficient_frontier(&mu, &cov, &quick_config(10)).expect_err("must fail");
    assert!(matches!(err, FrontierError::InvalidInput(_)));
  }

  #[test]
  fn rejects_non_square_covariance() {
    let mu = arr1(&[0.1, 0.2]);
    let cov = Array2::<f64>::zeros((2, 3));

    let err = efficient_frontier(&mu, &cov, &quick_config(10)).expect_err("must fail");
    assert!(matches!(err, FrontierError::InvalidInput(_)));
  }

  #[test]
  fn rejects_dimension_mismatch() {
    let mu = arr1(&[0.1, 0.2]);
    let cov = Array2::<f64>::zeros((3, 3));

    let err = efficient_frontier(&mu, &cov, &quick_config(10)).expect_err("must fail");
    assert!(matches!(err, FrontierError::InvalidInput(_)));
  }

  #[test]
  fn rejects_asymmetric_covariance() {
    let mu = arr1(&[0.1, 0.2]);
    let cov = arr2(&[[0.04, 0.02], [0.01, 0.09]]);

    let err = efficient_frontier(&mu, &cov, &quick_config(10)).expect_err("must fail");
    assert!(matches!(err, FrontierError::InvalidInput(_)));
  }

  #[test]
  fn rejects_negative_variance_on_diagonal() {
    let mu = arr1(&[0.1, 0.2]);
    let cov = arr2(&[[-0.04, 0.0], [0.0, 0.09]]);

    let err = efficient_frontier(&mu, &cov, &quick_config(10)).expect_err("must fail");
    assert!(matches!(err, FrontierError::InvalidInput(_)));
  }
}
