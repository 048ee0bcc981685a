//! # frontier-rs
//!
//! $$
//! \min_{\mathbf w}\ \sqrt{\mathbf w^\top \Sigma \mathbf w}
//! \quad\text{s.t.}\quad \textstyle\sum_i w_i = 1,\ \ \mathbf w\cdot\mu = r^\*,\ \ 0 \le w_i \le 1
//! $$
//!
//! Mean-variance efficient frontier computation and portfolio allocation
//! reporting for a small set of equity tickers. Price histories are turned
//! into annualized return/covariance estimates, the minimum-variance
//! frontier is traced over a grid of target returns, and a user-entered
//! allocation is normalized, charted and replayed over the historical
//! window.

pub mod allocation;
pub mod chart;
pub mod config;
pub mod error;
pub mod estimator;
pub mod frontier;
#[cfg(feature = "yahoo")]
pub mod yahoo;

pub use allocation::collect_amounts;
pub use allocation::cumulative_returns;
pub use allocation::portfolio_daily_returns;
pub use allocation::weights_from_amounts;
pub use chart::allocation_pie;
pub use chart::frontier_chart;
pub use chart::performance_chart;
pub use config::PortfolioConfig;
pub use error::FrontierError;
pub use estimator::estimate;
pub use estimator::simple_returns;
pub use estimator::PriceSeries;
pub use estimator::ReturnEstimates;
pub use estimator::TRADING_DAYS;
pub use frontier::efficient_frontier;
pub use frontier::portfolio_volatility;
pub use frontier::FrontierConfig;
pub use frontier::FrontierPoint;
