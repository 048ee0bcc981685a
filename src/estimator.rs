//! # Return/Covariance Estimator
//!
//! $$
//! \hat\mu = 252\,\overline{r},\qquad \hat\Sigma = 252\,\widehat{\mathrm{Cov}}(r)
//! $$
//!
//! Converts adjusted-close price histories into an annualized expected-return
//! vector and covariance matrix, plus the aligned daily-return matrix used by
//! the performance report.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::FrontierError;

/// Conventional trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Ordered adjusted-close history for one ticker. Immutable once fetched.
#[derive(Clone, Debug)]
pub struct PriceSeries {
  /// Asset identifier.
  pub ticker: String,
  /// Adjusted close prices in chronological order.
  pub adj_closes: Vec<f64>,
}

/// Annualized moment estimates over a set of tickers.
#[derive(Clone, Debug)]
pub struct ReturnEstimates {
  /// Asset identifiers, in input order.
  pub tickers: Vec<String>,
  /// Annualized mean return per asset.
  pub mean_returns: Array1<f64>,
  /// Annualized covariance matrix. Symmetric with non-negative diagonal.
  pub covariance: Array2<f64>,
  /// Aligned daily simple returns, rows = days, columns = assets.
  pub daily_returns: Array2<f64>,
}

/// Convert close prices to a simple fractional return series.
///
/// The first (undefined) return is dropped and pairs with a non-positive
/// previous close are skipped.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
  let mut out = Vec::with_capacity(closes.len().saturating_sub(1));
  for i in 1..closes.len() {
    if closes[i - 1] > 0.0 {
      out.push(closes[i] / closes[i - 1] - 1.0);
    }
  }
  out
}

/// Align multiple return series to common tail length.
pub fn align_returns(all_returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
  let min_len = all_returns.iter().map(|r| r.len()).min().unwrap_or(0);
  all_returns
    .iter()
    .map(|r| r[r.len().saturating_sub(min_len)..].to_vec())
    .collect()
}

/// Estimate annualized mean returns and covariance from price histories.
///
/// Fails with [`FrontierError::DataInsufficient`] when any ticker yields
/// fewer than two aligned returns; NaN is never propagated silently.
pub fn estimate(
  prices: &[PriceSeries],
  trading_days: f64,
) -> Result<ReturnEstimates, FrontierError> {
  if prices.is_empty() {
    return Err(FrontierError::InvalidInput(
      "no price series supplied".into(),
    ));
  }

  let mut all_returns = Vec::with_capacity(prices.len());
  for series in prices {
    let returns = simple_returns(&series.adj_closes);
    if returns.is_empty() {
      let usable = series.adj_closes.iter().filter(|&&c| c > 0.0).count();
      return Err(FrontierError::DataInsufficient {
        ticker: series.ticker.clone(),
        observations: usable,
      });
    }
    all_returns.push(returns);
  }

  let aligned = align_returns(&all_returns);
  let n_assets = aligned.len();
  let n_days = aligned[0].len();
  if n_days < 2 {
    // sample covariance needs at least two aligned return rows
    let shortest = all_returns
      .iter()
      .enumerate()
      .min_by_key(|(_, r)| r.len())
      .map(|(i, r)| (i, r.len()))
      .unwrap_or((0, 0));
    return Err(FrontierError::DataInsufficient {
      ticker: prices[shortest.0].ticker.clone(),
      observations: shortest.1 + 1,
    });
  }

  let daily_mean: Vec<f64> = aligned
    .iter()
    .map(|r| r.iter().sum::<f64>() / n_days as f64)
    .collect();
  let mean_returns: Array1<f64> = daily_mean.iter().map(|m| m * trading_days).collect();

  let mut covariance = Array2::<f64>::zeros((n_assets, n_assets));
  for i in 0..n_assets {
    for j in i..n_assets {
      let mut acc = 0.0;
      for t in 0..n_days {
        acc += (aligned[i][t] - daily_mean[i]) * (aligned[j][t] - daily_mean[j]);
      }
      let c = acc / (n_days - 1) as f64 * trading_days;
      covariance[[i, j]] = c;
      covariance[[j, i]] = c;
    }
  }

  let mut daily_returns = Array2::<f64>::zeros((n_days, n_assets));
  for (j, r) in aligned.iter().enumerate() {
    for (t, &v) in r.iter().enumerate() {
      daily_returns[[t, j]] = v;
    }
  }

  Ok(ReturnEstimates {
    tickers: prices.iter().map(|p| p.ticker.clone()).collect(),
    mean_returns,
    covariance,
    daily_returns,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn series(ticker: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries {
      ticker: ticker.to_string(),
      adj_closes: closes.to_vec(),
    }
  }

  #[test]
  fn simple_returns_drops_first_observation() {
    let returns = simple_returns(&[100.0, 110.0, 99.0]);

    assert_eq!(returns.len(), 2);
    assert!((returns[0] - 0.1).abs() < 1e-12);
    assert!((returns[1] + 0.1).abs() < 1e-12);
  }

  #[test]
  fn simple_returns_skips_non_positive_closes() {
    let returns = simple_returns(&[0.0, 100.0, 105.0]);

    assert_eq!(returns.len(), 1);
    assert!((returns[0] - 0.05).abs() < 1e-12);
  }

  #[test]
  fn estimate_annualizes_constant_returns() {
    let prices = vec![
      series("AAA", &[100.0, 101.0, 102.01, 103.0301]),
      series("BBB", &[50.0, 51.0, 52.02, 53.0604]),
    ];

    let estimates = estimate(&prices, 252.0).expect("estimation succeeds");

    assert!((estimates.mean_returns[0] - 0.01 * 252.0).abs() < 1e-9);
    assert!((estimates.mean_returns[1] - 0.02 * 252.0).abs() < 1e-9);
    assert!(estimates.covariance[[0, 0]].abs() < 1e-12);
  }

  #[test]
  fn estimate_covariance_is_symmetric_with_nonnegative_diagonal() {
    let prices = vec![
      series("AAA", &[100.0, 103.0, 99.0, 104.0, 101.0]),
      series("BBB", &[40.0, 39.0, 41.5, 40.2, 42.0]),
      series("CCC", &[10.0, 10.5, 10.1, 10.8, 10.4]),
    ];

    let estimates = estimate(&prices, 252.0).expect("estimation succeeds");
    let cov = &estimates.covariance;

    for i in 0..3 {
      assert!(cov[[i, i]] >= 0.0);
      for j in 0..3 {
        assert!((cov[[i, j]] - cov[[j, i]]).abs() < 1e-12);
      }
    }
  }

  #[test]
  fn estimate_aligns_histories_to_common_tail() {
    let prices = vec![
      series("AAA", &[100.0, 101.0, 102.0, 103.0, 104.0]),
      series("BBB", &[50.0, 51.0, 52.0]),
    ];

    let estimates = estimate(&prices, 252.0).expect("estimation succeeds");

    assert_eq!(estimates.daily_returns.nrows(), 2);
    assert_eq!(estimates.daily_returns.ncols(), 2);
  }

  #[test]
  fn estimate_rejects_short_history() {
    let prices = vec![
      series("AAA", &[100.0, 101.0, 102.0]),
      series("BBB", &[50.0]),
    ];

    let err = estimate(&prices, 252.0).expect_err("single observation must fail");

    match err {
      FrontierError::DataInsufficient { ticker, .. } => assert_eq!(ticker, "BBB"),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn estimate_rejects_empty_input() {
    let err = estimate(&[], 252.0).expect_err("empty input must fail");

    assert!(matches!(err, FrontierError::InvalidInput(_)));
  }
}
