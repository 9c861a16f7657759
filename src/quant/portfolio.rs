//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Category risk model, heuristic allocators and portfolio metrics.

pub mod data;
pub mod engine;
pub mod metrics;
pub mod optimizers;
pub mod report;
pub mod risk_model;
pub mod types;

pub use data::correlation_matrix;
pub use data::covariance_matrix;
pub use engine::OptimizationRequest;
pub use engine::PortfolioEngine;
pub use engine::PortfolioEngineConfig;
pub use metrics::compute_metrics;
pub use metrics::portfolio_statistics;
pub use optimizers::allocate_weights;
pub use optimizers::optimize;
pub use optimizers::DIVERSIFICATION_BOUNDS;
pub use report::OptimizationReport;
pub use risk_model::RiskModel;
pub use risk_model::RiskModelConfig;
pub use risk_model::DEFAULT_CATEGORY;
pub use risk_model::FALLBACK_CORRELATION;
pub use types::AllocationResult;
pub use types::AssetStat;
pub use types::Objective;
pub use types::PortfolioMetrics;
pub use types::PortfolioStatistics;
pub use types::SelectedAsset;
pub use types::DEFAULT_RISK_FREE_RATE;
