//! # portfolio-optimizer
//!
//! Deterministic portfolio allocation over a category-level risk model.
//!
//! A [`RiskModel`] maps asset categories to expected return, volatility and
//! beta plus a category correlation matrix. [`optimize`] turns a selection of
//! assets and an [`Objective`] into percentage weights; [`compute_metrics`]
//! evaluates expected return, volatility, Sharpe ratio and a heuristic maximum
//! drawdown for weighted selections. [`PortfolioEngine`] bundles both behind a
//! shared, immutable risk model.
//!
//! ```ignore
//! use portfolio_optimizer::{PortfolioEngine, SelectedAsset};
//!
//! let engine = PortfolioEngine::default();
//! let report = engine.run(&[
//!   SelectedAsset::new("BND", "Bonds"),
//!   SelectedAsset::new("VTI", "US Stocks"),
//! ]);
//! println!("{report}");
//! ```

pub mod quant;

pub use quant::portfolio::compute_metrics;
pub use quant::portfolio::optimize;
pub use quant::portfolio::AllocationResult;
pub use quant::portfolio::Objective;
pub use quant::portfolio::OptimizationReport;
pub use quant::portfolio::PortfolioEngine;
pub use quant::portfolio::PortfolioEngineConfig;
pub use quant::portfolio::PortfolioMetrics;
pub use quant::portfolio::RiskModel;
pub use quant::portfolio::SelectedAsset;
