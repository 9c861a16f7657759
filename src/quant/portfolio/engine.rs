//! # Portfolio Engine
//!
//! $$
//! \mathbf{w}^\* = \operatorname{Allocate}(\text{assets}, \text{objective}), \quad
//! (\mu_p, \sigma_p, S_p, \text{MDD}) = \operatorname{Metrics}(\mathbf{w}^\*)
//! $$
//!
//! High-level orchestration API: one shared risk model, a configured objective
//! and risk-free rate, and allocation + metrics in a single call.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::metrics::compute_metrics;
use super::optimizers::optimize;
use super::report::OptimizationReport;
use super::risk_model::RiskModel;
use super::types::AllocationResult;
use super::types::Objective;
use super::types::PortfolioMetrics;
use super::types::SelectedAsset;
use super::types::DEFAULT_RISK_FREE_RATE;

/// Runtime configuration for [`PortfolioEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEngineConfig {
  /// Objective used by [`PortfolioEngine::optimize`] and [`PortfolioEngine::run`].
  pub objective: Objective,
  /// Risk-free rate (percent) used in Sharpe computations.
  pub risk_free: f64,
}

impl Default for PortfolioEngineConfig {
  fn default() -> Self {
    Self {
      objective: Objective::MaxSharpe,
      risk_free: DEFAULT_RISK_FREE_RATE,
    }
  }
}

/// One independent unit of work for [`PortfolioEngine::run_batch`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
  pub assets: Vec<SelectedAsset>,
  pub objective: Objective,
  /// Overrides the engine's risk-free rate when set.
  #[serde(default)]
  pub risk_free: Option<f64>,
}

/// Single entry-point engine for allocation and metrics.
#[derive(Clone, Debug)]
pub struct PortfolioEngine {
  model: Arc<RiskModel>,
  config: PortfolioEngineConfig,
}

impl Default for PortfolioEngine {
  fn default() -> Self {
    Self::new(Arc::new(RiskModel::default()), PortfolioEngineConfig::default())
  }
}

impl PortfolioEngine {
  /// Construct a new engine over a shared risk model.
  pub fn new(model: Arc<RiskModel>, config: PortfolioEngineConfig) -> Self {
    Self { model, config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &PortfolioEngineConfig {
    &self.config
  }

  /// Borrow the shared risk model.
  pub fn model(&self) -> &RiskModel {
    &self.model
  }

  /// Allocate `assets` with the configured objective.
  pub fn optimize(&self, assets: &[SelectedAsset]) -> Vec<AllocationResult> {
    optimize(
      &self.model,
      assets,
      self.config.objective,
      Some(self.config.risk_free),
    )
  }

  /// Metrics for `assets` at `weights` (percent), equal-weighted when `None`.
  pub fn compute_metrics(
    &self,
    assets: &[SelectedAsset],
    weights: Option<&[f64]>,
  ) -> PortfolioMetrics {
    compute_metrics(&self.model, assets, weights, Some(self.config.risk_free))
  }

  /// Allocate with the configured objective and evaluate the result.
  pub fn run(&self, assets: &[SelectedAsset]) -> OptimizationReport {
    self.evaluate(assets, self.config.objective, self.config.risk_free)
  }

  /// One report per objective in [`Objective::ALL`].
  pub fn compare_objectives(&self, assets: &[SelectedAsset]) -> Vec<OptimizationReport> {
    Objective::ALL
      .iter()
      .map(|&objective| self.evaluate(assets, objective, self.config.risk_free))
      .collect()
  }

  /// Evaluate independent requests in parallel; output order follows input order.
  pub fn run_batch(&self, requests: &[OptimizationRequest]) -> Vec<OptimizationReport> {
    debug!(requests = requests.len(), "running optimization batch");
    requests
      .par_iter()
      .map(|req| {
        self.evaluate(
          &req.assets,
          req.objective,
          req.risk_free.unwrap_or(self.config.risk_free),
        )
      })
      .collect()
  }

  fn evaluate(
    &self,
    assets: &[SelectedAsset],
    objective: Objective,
    risk_free: f64,
  ) -> OptimizationReport {
    let allocations = optimize(&self.model, assets, objective, Some(risk_free));
    let weights: Vec<f64> = allocations.iter().map(|a| a.weight).collect();
    let metrics = compute_metrics(&self.model, assets, Some(&weights), Some(risk_free));

    OptimizationReport {
      objective,
      allocations,
      metrics,
    }
  }
}
