//! # Portfolio Optimizers
//!
//! $$
//! w_i = \frac{f(\mu_i, \sigma_i)}{\sum_j f(\mu_j, \sigma_j)} \cdot 100
//! $$
//!
//! Closed-form heuristic allocators. Every objective produces raw percentage
//! weights, applies its own clamp, then shares the same post-processing:
//! normalize, clamp to [`DIVERSIFICATION_BOUNDS`], normalize, round.

use tracing::debug;
use tracing::trace;

use super::risk_model::RiskModel;
use super::types::round_to;
use super::types::AllocationResult;
use super::types::Objective;
use super::types::SelectedAsset;
use super::types::DEFAULT_RISK_FREE_RATE;

/// Global per-asset bounds (percent) applied after the objective's own clamp.
pub const DIVERSIFICATION_BOUNDS: (f64, f64) = (2.0, 45.0);

/// Floor for the per-asset Sharpe score used by [`Objective::MaxSharpe`].
const MIN_SHARPE_SCORE: f64 = 0.1;

fn inverse(x: f64) -> f64 {
  if x > 0.0 {
    1.0 / x
  } else {
    0.0
  }
}

/// Express each value as a percentage of the total; zeros when the total is 0.
fn percent_shares(values: &[f64]) -> Vec<f64> {
  let total: f64 = values.iter().sum();
  if total == 0.0 {
    return vec![0.0; values.len()];
  }
  values.iter().map(|&v| v / total * 100.0).collect()
}

/// Rescale weights in place so they sum to 100. No-op when the sum is 0.
fn normalize_to_100(weights: &mut [f64]) {
  let total: f64 = weights.iter().sum();
  if total == 0.0 {
    return;
  }
  for w in weights.iter_mut() {
    *w = *w / total * 100.0;
  }
}

fn clamp_all(weights: &mut [f64], (lo, hi): (f64, f64)) -> usize {
  let mut clamped = 0;
  for w in weights.iter_mut() {
    let c = w.clamp(lo, hi);
    if c != *w {
      clamped += 1;
      *w = c;
    }
  }
  clamped
}

/// Risk adjustment applied to inverse-volatility weights by the min-volatility rule.
fn min_volatility_tilt(volatility: f64) -> f64 {
  if volatility < 15.0 {
    1.5
  } else if volatility < 25.0 {
    1.0
  } else {
    0.7
  }
}

/// Raw max-Sharpe weights: floored per-asset Sharpe scores as percentages.
pub fn max_sharpe_weights(returns: &[f64], vols: &[f64], risk_free: f64) -> Vec<f64> {
  let scores: Vec<f64> = returns
    .iter()
    .zip(vols)
    .map(|(&r, &v)| {
      let score = if v > 0.0 { (r - risk_free) / v } else { 0.0 };
      score.max(MIN_SHARPE_SCORE)
    })
    .collect();
  percent_shares(&scores)
}

/// Raw min-volatility weights: tilted inverse-volatility percentages.
pub fn min_volatility_weights(vols: &[f64]) -> Vec<f64> {
  risk_parity_weights(vols)
    .into_iter()
    .zip(vols)
    .map(|(w, &v)| w * min_volatility_tilt(v))
    .collect()
}

/// Raw max-return weights: expected returns as percentages of their sum.
pub fn max_return_weights(returns: &[f64]) -> Vec<f64> {
  percent_shares(returns)
}

/// Equal weights of `100 / n`.
pub fn equal_weights(n: usize) -> Vec<f64> {
  if n == 0 {
    return Vec::new();
  }
  vec![100.0 / n as f64; n]
}

/// Raw risk-parity weights: inverse-volatility percentages.
pub fn risk_parity_weights(vols: &[f64]) -> Vec<f64> {
  let inv: Vec<f64> = vols.iter().map(|&v| inverse(v)).collect();
  percent_shares(&inv)
}

/// Raw weights for `objective` after its own clamp, before post-processing.
pub fn objective_weights(
  objective: Objective,
  returns: &[f64],
  vols: &[f64],
  risk_free: f64,
) -> Vec<f64> {
  let mut weights = match objective {
    Objective::MaxSharpe => max_sharpe_weights(returns, vols, risk_free),
    Objective::MinVolatility => min_volatility_weights(vols),
    Objective::MaxReturn => max_return_weights(returns),
    Objective::EqualWeight => equal_weights(returns.len()),
    Objective::RiskParity => risk_parity_weights(vols),
  };

  if let Some(bounds) = objective.bounds() {
    let clamped = clamp_all(&mut weights, bounds);
    trace!(%objective, clamped, "applied objective bounds");
  }

  weights
}

/// Final unrounded weights (percent) for `assets` under `objective`.
///
/// The result sums to 100 for any non-empty input; an empty input yields an
/// empty vector. `risk_free` defaults to [`DEFAULT_RISK_FREE_RATE`].
pub fn allocate_weights(
  model: &RiskModel,
  assets: &[SelectedAsset],
  objective: Objective,
  risk_free: Option<f64>,
) -> Vec<f64> {
  if assets.is_empty() {
    return Vec::new();
  }
  let risk_free = risk_free.unwrap_or(DEFAULT_RISK_FREE_RATE);

  let (returns, vols): (Vec<f64>, Vec<f64>) = assets
    .iter()
    .map(|a| {
      let stat = model.stats_for(&a.category);
      (stat.expected_return, stat.volatility)
    })
    .unzip();

  let mut weights = objective_weights(objective, &returns, &vols, risk_free);
  normalize_to_100(&mut weights);
  let clamped = clamp_all(&mut weights, DIVERSIFICATION_BOUNDS);
  normalize_to_100(&mut weights);

  trace!(?weights, clamped, "diversified weights");
  weights
}

/// Allocate `assets` under `objective`, rounding each weight to one decimal.
pub fn optimize(
  model: &RiskModel,
  assets: &[SelectedAsset],
  objective: Objective,
  risk_free: Option<f64>,
) -> Vec<AllocationResult> {
  debug!(%objective, assets = assets.len(), ?risk_free, "optimizing allocation");

  allocate_weights(model, assets, objective, risk_free)
    .into_iter()
    .zip(assets)
    .map(|(w, asset)| AllocationResult {
      symbol: asset.symbol.clone(),
      category: asset.category.clone(),
      weight: round_to(w, 1),
    })
    .collect()
}
