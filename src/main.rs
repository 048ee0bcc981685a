use anyhow::Result;
use prettytable::row;
use prettytable::Table;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use frontier_rs::allocation;
use frontier_rs::chart;
use frontier_rs::config::PortfolioConfig;
use frontier_rs::estimator;
use frontier_rs::frontier;
use frontier_rs::yahoo;

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer())
    .with(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let config = PortfolioConfig::default();

  println!(
    "Total amount available to invest: ${:.2}",
    config.investment_ceiling
  );

  let prices = yahoo::fetch_price_histories(&config)?;
  let estimates = estimator::estimate(&prices, estimator::TRADING_DAYS)?;

  let stdin = std::io::stdin();
  let stdout = std::io::stdout();
  let amounts = allocation::collect_amounts(
    &config.tickers,
    config.investment_ceiling,
    stdin.lock(),
    stdout.lock(),
  )?;
  let total: f64 = amounts.iter().sum();
  println!("\nTotal invested: ${total:.2}");

  let weights = allocation::weights_from_amounts(&amounts)?;

  println!("\nPortfolio weights:");
  let mut table = Table::new();
  table.add_row(row!["Ticker", "Weight"]);
  for (ticker, weight) in config.tickers.iter().zip(weights.iter()) {
    table.add_row(row![ticker, format!("{:.2}%", weight * 100.0)]);
  }
  table.printstd();

  let points = frontier::efficient_frontier(
    &estimates.mean_returns,
    &estimates.covariance,
    &frontier::FrontierConfig::default(),
  )?;
  tracing::info!(points = points.len(), "traced efficient frontier");

  chart::frontier_chart(&points).show();
  chart::allocation_pie(&config.tickers, &weights).show();

  let daily = allocation::portfolio_daily_returns(&estimates.daily_returns, &weights)?;
  let cumulative = allocation::cumulative_returns(&daily);
  chart::performance_chart(&cumulative).show();

  Ok(())
}
