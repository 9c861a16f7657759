//! # Portfolio Metrics
//!
//! $$
//! \sigma_p^2 = \frac{\mathbf{w}^\top \Sigma \mathbf{w}}{10^4}, \qquad
//! \text{MDD} = -\min\!\big(\sigma_p \beta_p \cdot 1.5 (1 - 0.3 D),\ 2.5\,\sigma_p\big)
//! $$
//!
//! Expected return, volatility, Sharpe ratio and the heuristic drawdown
//! estimate for a weighted selection. `D` is the log-scaled diversification
//! factor `min(1, ln n / ln 10)`.

use nalgebra::DVector;
use tracing::debug;
use tracing::warn;

use super::data::covariance_matrix;
use super::risk_model::RiskModel;
use super::types::PortfolioMetrics;
use super::types::PortfolioStatistics;
use super::types::SelectedAsset;
use super::types::DEFAULT_RISK_FREE_RATE;

/// Rescales the percent-by-percent covariance form.
const VARIANCE_SCALE: f64 = 10_000.0;
const DRAWDOWN_BETA_MULTIPLIER: f64 = 1.5;
const DRAWDOWN_DIVERSIFICATION_DAMPING: f64 = 0.3;
const DRAWDOWN_VOLATILITY_CAP: f64 = 2.5;

/// Log-scaled diversification factor for `n` assets.
pub fn diversification_factor(n: usize) -> f64 {
  if n > 1 {
    ((n as f64).ln() / 10f64.ln()).min(1.0)
  } else {
    0.0
  }
}

/// Heuristic maximum-drawdown estimate (non-positive).
pub fn max_drawdown_estimate(volatility: f64, beta: f64, diversification: f64) -> f64 {
  let beta_driven = volatility
    * beta
    * DRAWDOWN_BETA_MULTIPLIER
    * (1.0 - diversification * DRAWDOWN_DIVERSIFICATION_DAMPING);
  -beta_driven.min(volatility * DRAWDOWN_VOLATILITY_CAP)
}

/// Fractional weights: `weight / 100`, or `1 / n` when no usable weights are given.
fn fractions(n: usize, weights: Option<&[f64]>) -> Vec<f64> {
  match weights {
    Some(w) if w.len() == n => w.iter().map(|&wi| wi / 100.0).collect(),
    Some(w) => {
      warn!(
        weights = w.len(),
        assets = n,
        "weight vector does not match assets, using equal weights"
      );
      vec![1.0 / n as f64; n]
    }
    None => vec![1.0 / n as f64; n],
  }
}

/// Unrounded statistics for `assets` held at `weights` (percent).
///
/// `risk_free` defaults to [`DEFAULT_RISK_FREE_RATE`].
pub fn portfolio_statistics(
  model: &RiskModel,
  assets: &[SelectedAsset],
  weights: Option<&[f64]>,
  risk_free: Option<f64>,
) -> PortfolioStatistics {
  let n = assets.len();
  if n == 0 {
    return PortfolioStatistics::default();
  }
  let risk_free = risk_free.unwrap_or(DEFAULT_RISK_FREE_RATE);

  let w = fractions(n, weights);
  let stats: Vec<_> = assets.iter().map(|a| model.stats_for(&a.category)).collect();

  let expected_return: f64 = w
    .iter()
    .zip(&stats)
    .map(|(wi, s)| wi * s.expected_return)
    .sum();
  let beta: f64 = w.iter().zip(&stats).map(|(wi, s)| wi * s.beta).sum();

  let sigma = covariance_matrix(model, assets);
  let wv = DVector::from_vec(w);
  let variance = wv.dot(&(&sigma * &wv)) / VARIANCE_SCALE;
  let volatility = variance.max(0.0).sqrt();

  let sharpe_ratio = if volatility > 0.0 {
    (expected_return - risk_free) / volatility
  } else {
    0.0
  };

  let diversification = diversification_factor(n);
  let max_drawdown = max_drawdown_estimate(volatility, beta, diversification);

  debug!(
    assets = n,
    expected_return, volatility, sharpe_ratio, max_drawdown, "computed portfolio metrics"
  );

  PortfolioStatistics {
    expected_return,
    variance,
    volatility,
    sharpe_ratio,
    beta,
    diversification_factor: diversification,
    max_drawdown,
  }
}

/// Display-precision metrics for `assets` held at `weights` (percent).
///
/// Without weights the selection is treated as equally weighted. An empty
/// selection yields all-zero metrics.
pub fn compute_metrics(
  model: &RiskModel,
  assets: &[SelectedAsset],
  weights: Option<&[f64]>,
  risk_free: Option<f64>,
) -> PortfolioMetrics {
  portfolio_statistics(model, assets, weights, risk_free).to_metrics()
}
