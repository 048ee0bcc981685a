//! # Configuration
//!
//! $$
//! (\text{tickers}, [t_0, t_1], C) \mapsto \text{one run}
//! $$
//!
//! Explicit run configuration. Every collaborator receives this by value or
//! reference; there are no module-level run constants.

use chrono::NaiveDate;

/// Inputs of a single frontier/allocation run.
#[derive(Clone, Debug)]
pub struct PortfolioConfig {
  /// Ticker symbols to fetch and allocate over.
  pub tickers: Vec<String>,
  /// First day of the price history (inclusive).
  pub start: NaiveDate,
  /// Last day of the price history (exclusive).
  pub end: NaiveDate,
  /// Total investment ceiling in currency units.
  pub investment_ceiling: f64,
}

impl Default for PortfolioConfig {
  fn default() -> Self {
    Self {
      tickers: ["ABEV3.SA", "BBDC4.SA", "BRFS3.SA", "PETR4.SA", "TAEE11.SA"]
        .into_iter()
        .map(str::to_string)
        .collect(),
      start: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid calendar date"),
      end: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid calendar date"),
      investment_ceiling: 1000.0,
    }
  }
}
