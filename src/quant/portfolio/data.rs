//! # Portfolio Data Utilities
//!
//! $$
//! \Sigma_{ij} = \sigma_i \sigma_j \rho_{ij}
//! $$
//!
//! Dense correlation/covariance matrices for a selection, resolved through the
//! category risk model.

use nalgebra::DMatrix;

use super::risk_model::RiskModel;
use super::types::SelectedAsset;

/// Correlation matrix for the categories of `assets`, resolved through `model`.
///
/// Entries come straight from [`RiskModel::correlation`]: the diagonal is 1.0
/// and a pair missing from the table yields the fallback coefficient.
pub fn correlation_matrix(model: &RiskModel, assets: &[SelectedAsset]) -> Vec<Vec<f64>> {
  assets
    .iter()
    .map(|a| {
      assets
        .iter()
        .map(|b| model.correlation(&a.category, &b.category))
        .collect()
    })
    .collect()
}

/// Per-asset volatilities (percent) resolved through `model`.
pub fn volatilities(model: &RiskModel, assets: &[SelectedAsset]) -> Vec<f64> {
  assets
    .iter()
    .map(|a| model.stats_for(&a.category).volatility)
    .collect()
}

/// Covariance matrix (percent squared) for the categories of `assets`.
///
/// Every entry is resolved through the risk model, so the matrix is always
/// complete and its diagonal is the squared category volatility.
pub fn covariance_matrix(model: &RiskModel, assets: &[SelectedAsset]) -> DMatrix<f64> {
  let sigmas = volatilities(model, assets);
  let n = assets.len();
  DMatrix::from_fn(n, n, |i, j| {
    sigmas[i] * sigmas[j] * model.correlation(&assets[i].category, &assets[j].category)
  })
}
