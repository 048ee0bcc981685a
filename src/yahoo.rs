//! # Market Data
//!
//! $$
//! \text{ticker} \times [t_0, t_1) \mapsto \{\text{adjusted close}_t\}
//! $$
//!
//! Adjusted-close history download via Yahoo Finance. One request per
//! ticker, no retry or backoff; any provider failure aborts the run.

use anyhow::Context;
use anyhow::Result;
use chrono::NaiveDate;
use chrono::NaiveTime;
use time::OffsetDateTime;
use yahoo_finance_api::YahooConnector;

use crate::config::PortfolioConfig;
use crate::estimator::PriceSeries;

fn midnight_utc(date: NaiveDate) -> Result<OffsetDateTime> {
  let ts = date.and_time(NaiveTime::MIN).and_utc().timestamp();
  OffsetDateTime::from_unix_timestamp(ts).context("date out of range for provider query")
}

/// Download adjusted-close histories for every configured ticker.
pub fn fetch_price_histories(config: &PortfolioConfig) -> Result<Vec<PriceSeries>> {
  let provider = YahooConnector::new().context("failed to build Yahoo Finance client")?;
  let start = midnight_utc(config.start)?;
  let end = midnight_utc(config.end)?;

  let mut histories = Vec::with_capacity(config.tickers.len());
  for ticker in &config.tickers {
    let response = tokio_test::block_on(provider.get_quote_history(ticker, start, end))
      .with_context(|| format!("quote history request failed for {ticker}"))?;
    let quotes = response
      .quotes()
      .with_context(|| format!("no usable quotes returned for {ticker}"))?;

    tracing::info!(ticker = %ticker, quotes = quotes.len(), "downloaded price history");

    histories.push(PriceSeries {
      ticker: ticker.clone(),
      adj_closes: quotes.iter().map(|q| q.adjclose).collect(),
    });
  }

  Ok(histories)
}
