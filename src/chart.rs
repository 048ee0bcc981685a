//! # Charts
//!
//! $$
//! \{(\sigma_k, r_k)\} \mapsto \text{frontier curve},\qquad
//! \mathbf w \mapsto \text{allocation pie}
//! $$
//!
//! Plotly chart builders for the frontier, the user allocation and the
//! historical performance of the chosen weights. Builders return [`Plot`]
//! values; rendering is the caller's decision.

use ndarray::Array1;
use plotly::common::DashType;
use plotly::common::Line;
use plotly::common::Mode;
use plotly::layout::Axis;
use plotly::Layout;
use plotly::Pie;
use plotly::Plot;
use plotly::Scatter;

use crate::frontier::FrontierPoint;

/// Efficient-frontier line chart, x = risk, y = expected return.
pub fn frontier_chart(points: &[FrontierPoint]) -> Plot {
  let risk: Vec<f64> = points.iter().map(|p| p.risk).collect();
  let ret: Vec<f64> = points.iter().map(|p| p.expected_return).collect();

  let trace = Scatter::new(risk, ret)
    .mode(Mode::Lines)
    .name("Efficient frontier")
    .line(Line::new().width(3.0).dash(DashType::Dash).color("green"));

  let mut plot = Plot::new();
  plot.add_trace(trace);
  plot.set_layout(
    Layout::new()
      .title("Efficient Frontier")
      .x_axis(Axis::new().title("Risk (standard deviation)"))
      .y_axis(Axis::new().title("Expected return")),
  );

  plot
}

/// Allocation pie chart, one slice per ticker.
pub fn allocation_pie(tickers: &[String], weights: &[f64]) -> Plot {
  let trace = Pie::new(weights.to_vec())
    .labels(tickers.to_vec())
    .name("Allocation");

  let mut plot = Plot::new();
  plot.add_trace(trace);
  plot.set_layout(Layout::new().title("Asset Allocation"));

  plot
}

/// Cumulative portfolio return over the historical window, x = day index.
pub fn performance_chart(cumulative: &Array1<f64>) -> Plot {
  let days: Vec<usize> = (0..cumulative.len()).collect();

  let trace = Scatter::new(days, cumulative.to_vec())
    .mode(Mode::Lines)
    .name("Cumulative return");

  let mut plot = Plot::new();
  plot.add_trace(trace);
  plot.set_layout(
    Layout::new()
      .title("Portfolio Performance History")
      .x_axis(Axis::new().title("Day"))
      .y_axis(Axis::new().title("Cumulative return")),
  );

  plot
}
