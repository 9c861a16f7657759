//! # Portfolio Types
//!
//! $$
//! \mathbf{w}^\*=\arg\max_{\mathbf{w}} \frac{\mathbb E[R_p]-r_f}{\sigma_p}
//! $$
//!
//! Shared enums, inputs and result containers for allocation and metrics.

use std::fmt::Display;

use impl_new_derive::ImplNew;
use serde::Deserialize;
use serde::Serialize;

/// Risk-free rate (percent) used when the caller does not supply one.
pub const DEFAULT_RISK_FREE_RATE: f64 = 4.5;

/// Supported allocation objectives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
  /// Weights proportional to the floored per-asset Sharpe ratio.
  #[default]
  MaxSharpe,
  /// Inverse-volatility weights tilted toward low-volatility assets.
  MinVolatility,
  /// Weights proportional to expected return.
  MaxReturn,
  /// `100 / n` for every asset.
  EqualWeight,
  /// Plain inverse-volatility weights.
  RiskParity,
}

impl Objective {
  /// Every objective, in presentation order.
  pub const ALL: [Objective; 5] = [
    Objective::MaxSharpe,
    Objective::MinVolatility,
    Objective::MaxReturn,
    Objective::EqualWeight,
    Objective::RiskParity,
  ];

  /// Parse a string into an [`Objective`].
  ///
  /// Unrecognized input resolves to [`Objective::RiskParity`].
  pub fn from_str(s: &str) -> Self {
    let key: String = s
      .chars()
      .filter(|c| !matches!(c, '-' | '_' | ' '))
      .collect::<String>()
      .to_lowercase();

    match key.as_str() {
      "maxsharpe" | "sharpe" | "maximumsharperatio" => Self::MaxSharpe,
      "minvolatility" | "minvol" | "minimumvolatility" => Self::MinVolatility,
      "maxreturn" | "maximumreturn" => Self::MaxReturn,
      "equalweight" | "equal" => Self::EqualWeight,
      _ => Self::RiskParity,
    }
  }

  /// Human-readable objective name.
  pub fn label(&self) -> &'static str {
    match self {
      Objective::MaxSharpe => "Maximum Sharpe Ratio",
      Objective::MinVolatility => "Minimum Volatility",
      Objective::MaxReturn => "Maximum Return",
      Objective::EqualWeight => "Equal Weight",
      Objective::RiskParity => "Risk Parity",
    }
  }

  /// Per-asset clamp applied to raw weights (percent), if any.
  pub fn bounds(&self) -> Option<(f64, f64)> {
    match self {
      Objective::MaxSharpe => Some((5.0, 40.0)),
      Objective::MinVolatility => Some((3.0, 50.0)),
      Objective::MaxReturn => Some((8.0, 35.0)),
      Objective::EqualWeight | Objective::RiskParity => None,
    }
  }
}

impl Display for Objective {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// Per-category return, risk and market sensitivity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ImplNew)]
#[serde(rename_all = "camelCase")]
pub struct AssetStat {
  /// Category this record describes.
  pub category: String,
  /// Expected annual return in percent.
  pub expected_return: f64,
  /// Annualized volatility in percent.
  pub volatility: f64,
  /// Market beta.
  pub beta: f64,
}

/// An asset picked by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedAsset {
  pub symbol: String,
  pub category: String,
}

impl SelectedAsset {
  pub fn new(symbol: impl Into<String>, category: impl Into<String>) -> Self {
    Self {
      symbol: symbol.into(),
      category: category.into(),
    }
  }
}

/// Target weight of a single asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
  pub symbol: String,
  pub category: String,
  /// Weight in percent, rounded to one decimal.
  pub weight: f64,
}

/// Display-precision portfolio metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
  /// Expected annual return in percent, one decimal.
  pub expected_return: f64,
  /// Portfolio volatility, one decimal.
  pub volatility: f64,
  /// Sharpe ratio, two decimals.
  pub sharpe_ratio: f64,
  /// Heuristic maximum drawdown (non-positive), one decimal.
  pub max_drawdown: f64,
}

/// Unrounded portfolio statistics backing [`PortfolioMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PortfolioStatistics {
  pub expected_return: f64,
  pub variance: f64,
  pub volatility: f64,
  pub sharpe_ratio: f64,
  pub beta: f64,
  pub diversification_factor: f64,
  pub max_drawdown: f64,
}

impl PortfolioStatistics {
  /// Round to display precision.
  pub fn to_metrics(&self) -> PortfolioMetrics {
    PortfolioMetrics {
      expected_return: round_to(self.expected_return, 1),
      volatility: round_to(self.volatility, 1),
      sharpe_ratio: round_to(self.sharpe_ratio, 2),
      max_drawdown: round_to(self.max_drawdown, 1),
    }
  }
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(x: f64, decimals: i32) -> f64 {
  let scale = 10f64.powi(decimals);
  (x * scale).round() / scale
}
