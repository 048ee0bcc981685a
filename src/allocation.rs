//! # Allocation & Reporting
//!
//! $$
//! w_i = \frac{a_i}{\sum_j a_j},\qquad
//! G_T = \prod_{t=1}^{T}(1+r_t) - 1
//! $$
//!
//! Budget-constrained interactive entry of per-ticker amounts, weight
//! normalization and historical portfolio performance arithmetic. Entry
//! mistakes re-prompt locally and are never surfaced to the caller.

use std::io::BufRead;
use std::io::Error;
use std::io::ErrorKind;
use std::io::Write;

use ndarray::Array1;
use ndarray::Array2;

use crate::error::FrontierError;

#[derive(Debug)]
enum EntryError {
  NotNumeric,
  Negative,
  BudgetExceeded { remaining: f64 },
}

fn validate_entry(raw: &str, invested: f64, ceiling: f64) -> Result<f64, EntryError> {
  let amount: f64 = raw.trim().parse().map_err(|_| EntryError::NotNumeric)?;
  if amount.is_nan() {
    return Err(EntryError::NotNumeric);
  }
  if amount < 0.0 {
    return Err(EntryError::Negative);
  }
  if invested + amount > ceiling {
    return Err(EntryError::BudgetExceeded {
      remaining: ceiling - invested,
    });
  }

  Ok(amount)
}

/// Prompt for one amount per ticker, re-prompting until each entry is
/// numeric, non-negative and keeps the running total within the ceiling.
///
/// Reader and writer are injected so the loop is drivable in tests.
pub fn collect_amounts<R: BufRead, W: Write>(
  tickers: &[String],
  ceiling: f64,
  mut input: R,
  mut output: W,
) -> std::io::Result<Vec<f64>> {
  let mut amounts = Vec::with_capacity(tickers.len());
  let mut invested = 0.0;

  for ticker in tickers {
    loop {
      write!(output, "Amount to invest in {ticker} ($): ")?;
      output.flush()?;

      let mut line = String::new();
      if input.read_line(&mut line)? == 0 {
        return Err(Error::new(
          ErrorKind::UnexpectedEof,
          "input closed before all amounts were entered",
        ));
      }

      match validate_entry(&line, invested, ceiling) {
        Ok(amount) => {
          invested += amount;
          amounts.push(amount);
          break;
        }
        Err(EntryError::NotNumeric) => {
          writeln!(output, "Please enter a valid numeric value.")?;
        }
        Err(EntryError::Negative) => {
          writeln!(output, "Amounts must be non-negative.")?;
        }
        Err(EntryError::BudgetExceeded { remaining }) => {
          writeln!(
            output,
            "Total invested cannot exceed ${ceiling:.2}. You can still invest up to ${remaining:.2}."
          )?;
        }
      }
    }
  }

  Ok(amounts)
}

/// Normalize dollar amounts into portfolio weights.
pub fn weights_from_amounts(amounts: &[f64]) -> Result<Vec<f64>, FrontierError> {
  let total: f64 = amounts.iter().sum();
  if total <= 0.0 || !total.is_finite() {
    return Err(FrontierError::InvalidInput(
      "total invested amount must be positive to derive weights".into(),
    ));
  }

  Ok(amounts.iter().map(|a| a / total).collect())
}

/// Daily portfolio return series as the dot product of the historical
/// return matrix (rows = days) and the weight vector.
pub fn portfolio_daily_returns(
  daily_returns: &Array2<f64>,
  weights: &[f64],
) -> Result<Array1<f64>, FrontierError> {
  if daily_returns.ncols() != weights.len() {
    return Err(FrontierError::InvalidInput(format!(
      "return matrix has {} columns but {} weights were supplied",
      daily_returns.ncols(),
      weights.len()
    )));
  }

  let w = Array1::from_vec(weights.to_vec());
  Ok(daily_returns.dot(&w))
}

/// Running cumulative return, `prod(1 + r_t) - 1` at each step.
pub fn cumulative_returns(daily: &Array1<f64>) -> Array1<f64> {
  let mut acc = 1.0;
  daily
    .iter()
    .map(|r| {
      acc *= 1.0 + r;
      acc - 1.0
    })
    .collect()
}
