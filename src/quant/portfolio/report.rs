//! # Optimization Report
//!
//! Allocation + metrics bundle returned by the engine, with a terminal table view.

use std::fmt::Display;

use prettytable::row;
use prettytable::Table;
use serde::Deserialize;
use serde::Serialize;

use super::types::AllocationResult;
use super::types::Objective;
use super::types::PortfolioMetrics;

/// Result of one optimization: the allocation and its metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
  pub objective: Objective,
  pub allocations: Vec<AllocationResult>,
  pub metrics: PortfolioMetrics,
}

impl OptimizationReport {
  /// Render allocations followed by the metric summary.
  pub fn to_table(&self) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Symbol", "Category", "Weight (%)"]);

    for a in &self.allocations {
      table.add_row(row![a.symbol, a.category, format!("{:.1}", a.weight)]);
    }

    let m = &self.metrics;
    table.add_row(row!["Objective", "", self.objective.label()]);
    table.add_row(row!["Expected return (%)", "", format!("{:.1}", m.expected_return)]);
    table.add_row(row!["Volatility (%)", "", format!("{:.1}", m.volatility)]);
    table.add_row(row!["Sharpe ratio", "", format!("{:.2}", m.sharpe_ratio)]);
    table.add_row(row!["Max drawdown (%)", "", format!("{:.1}", m.max_drawdown)]);
    table
  }
}

impl Display for OptimizationReport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.to_table())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_lists_allocations_and_metrics() {
    let report = OptimizationReport {
      objective: Objective::EqualWeight,
      allocations: vec![
        AllocationResult {
          symbol: "BND".to_string(),
          category: "Bonds".to_string(),
          weight: 50.0,
        },
        AllocationResult {
          symbol: "VTI".to_string(),
          category: "US Stocks".to_string(),
          weight: 50.0,
        },
      ],
      metrics: PortfolioMetrics {
        expected_return: 7.4,
        volatility: 0.1,
        sharpe_ratio: 30.48,
        max_drawdown: -0.1,
      },
    };

    let table = report.to_table();
    assert_eq!(table.len(), 7);

    let rendered = report.to_string();
    assert!(rendered.contains("US Stocks"));
    assert!(rendered.contains("50.0"));
    assert!(rendered.contains("Equal Weight"));
    assert!(rendered.contains("30.48"));
    assert!(rendered.contains("-0.1"));
  }
}
