//! # Risk Model
//!
//! $$
//! c \mapsto (\mu_c, \sigma_c, \beta_c), \qquad (c_a, c_b) \mapsto \rho_{ab}
//! $$
//!
//! Category-level return/volatility/beta table and the category correlation
//! matrix. Lookups never fail: unknown categories resolve to the default entry
//! and unknown pairs to [`FALLBACK_CORRELATION`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use tracing::trace;

use super::types::AssetStat;

/// Reserved category name for the fallback statistics entry.
pub const DEFAULT_CATEGORY: &str = "Default";

/// Correlation returned for a pair missing from the matrix.
pub const FALLBACK_CORRELATION: f64 = 0.5;

/// Built-in `(category, return, volatility, beta)` rows.
const BUILTIN_STATS: [(&str, f64, f64, f64); 9] = [
  ("US Stocks", 10.5, 18.2, 1.0),
  ("International Stocks", 8.7, 20.1, 0.9),
  ("Emerging Markets", 11.2, 25.8, 1.2),
  ("Bonds", 4.2, 6.5, 0.15),
  ("Real Estate", 8.9, 19.5, 0.8),
  ("Commodities", 6.1, 22.4, 0.3),
  ("Crypto", 25.0, 65.0, 1.8),
  ("Technology", 14.3, 26.5, 1.25),
  (DEFAULT_CATEGORY, 8.0, 20.0, 1.0),
];

/// Built-in upper triangle of the correlation matrix.
const BUILTIN_CORRELATIONS: [(&str, &str, f64); 28] = [
  ("US Stocks", "International Stocks", 0.85),
  ("US Stocks", "Emerging Markets", 0.75),
  ("US Stocks", "Bonds", -0.1),
  ("US Stocks", "Real Estate", 0.65),
  ("US Stocks", "Commodities", 0.3),
  ("US Stocks", "Crypto", 0.4),
  ("US Stocks", "Technology", 0.9),
  ("International Stocks", "Emerging Markets", 0.8),
  ("International Stocks", "Bonds", -0.05),
  ("International Stocks", "Real Estate", 0.6),
  ("International Stocks", "Commodities", 0.35),
  ("International Stocks", "Crypto", 0.35),
  ("International Stocks", "Technology", 0.75),
  ("Emerging Markets", "Bonds", 0.0),
  ("Emerging Markets", "Real Estate", 0.55),
  ("Emerging Markets", "Commodities", 0.45),
  ("Emerging Markets", "Crypto", 0.4),
  ("Emerging Markets", "Technology", 0.7),
  ("Bonds", "Real Estate", 0.2),
  ("Bonds", "Commodities", 0.05),
  ("Bonds", "Crypto", -0.05),
  ("Bonds", "Technology", -0.15),
  ("Real Estate", "Commodities", 0.25),
  ("Real Estate", "Crypto", 0.3),
  ("Real Estate", "Technology", 0.55),
  ("Commodities", "Crypto", 0.2),
  ("Commodities", "Technology", 0.2),
  ("Crypto", "Technology", 0.5),
];

/// Serializable risk model configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskModelConfig {
  /// Statistics keyed by category.
  pub category_stats: HashMap<String, AssetStat>,
  /// Nested `row -> column -> coefficient` correlation table.
  pub correlations: HashMap<String, HashMap<String, f64>>,
  /// Key of the fallback entry in `category_stats`.
  #[serde(default = "default_category")]
  pub default_category: String,
}

fn default_category() -> String {
  DEFAULT_CATEGORY.to_string()
}

impl Default for RiskModelConfig {
  fn default() -> Self {
    let category_stats = BUILTIN_STATS
      .iter()
      .map(|&(category, ret, vol, beta)| {
        (
          category.to_string(),
          AssetStat::new(category.to_string(), ret, vol, beta),
        )
      })
      .collect();

    let mut correlations: HashMap<String, HashMap<String, f64>> = HashMap::new();
    for &(category, ..) in BUILTIN_STATS.iter() {
      correlations
        .entry(category.to_string())
        .or_default()
        .insert(category.to_string(), 1.0);
    }
    let default_pairs = BUILTIN_STATS
      .iter()
      .filter(|(category, ..)| *category != DEFAULT_CATEGORY)
      .map(|&(category, ..)| (DEFAULT_CATEGORY, category, FALLBACK_CORRELATION));
    for (a, b, rho) in BUILTIN_CORRELATIONS.iter().copied().chain(default_pairs) {
      correlations
        .entry(a.to_string())
        .or_default()
        .insert(b.to_string(), rho);
      correlations
        .entry(b.to_string())
        .or_default()
        .insert(a.to_string(), rho);
    }

    Self {
      category_stats,
      correlations,
      default_category: default_category(),
    }
  }
}

impl RiskModelConfig {
  /// Check the table for the invariants [`RiskModel`] relies on.
  pub fn validate(&self) -> Result<()> {
    if !self.category_stats.contains_key(&self.default_category) {
      bail!(
        "default category '{}' is missing from categoryStats",
        self.default_category
      );
    }

    for (key, stat) in &self.category_stats {
      if key != &stat.category {
        bail!(
          "categoryStats key '{key}' does not match record category '{}'",
          stat.category
        );
      }
      if !stat.expected_return.is_finite() || !stat.beta.is_finite() {
        bail!("category '{key}' has a non-finite return or beta");
      }
      if !stat.volatility.is_finite() || stat.volatility <= 0.0 {
        bail!(
          "category '{key}' has non-positive volatility {}",
          stat.volatility
        );
      }
    }

    for (a, row) in &self.correlations {
      for (b, &rho) in row {
        if !rho.is_finite() || !(-1.0..=1.0).contains(&rho) {
          bail!("correlation({a}, {b}) = {rho} is outside [-1, 1]");
        }
        if a == b && rho != 1.0 {
          bail!("diagonal correlation({a}, {a}) must be 1.0, got {rho}");
        }
        match self.correlations.get(b).and_then(|r| r.get(a)) {
          Some(&mirror) if mirror == rho => {}
          Some(&mirror) => {
            bail!("correlation({a}, {b}) = {rho} but correlation({b}, {a}) = {mirror}")
          }
          None => bail!("correlation({a}, {b}) has no mirrored entry"),
        }
      }
    }

    let categories: Vec<&String> = self.category_stats.keys().collect();
    for a in &categories {
      let row = self
        .correlations
        .get(*a)
        .with_context(|| format!("category '{a}' has no correlation row"))?;
      for b in &categories {
        if !row.contains_key(*b) {
          bail!("correlation row for '{a}' is missing column '{b}'");
        }
      }
    }

    Ok(())
  }
}

/// Immutable category risk model shared by the allocator and metrics.
#[derive(Clone, Debug)]
pub struct RiskModel {
  config: RiskModelConfig,
  default_stat: AssetStat,
}

impl Default for RiskModel {
  fn default() -> Self {
    let (category, ret, vol, beta) = BUILTIN_STATS[BUILTIN_STATS.len() - 1];
    Self {
      config: RiskModelConfig::default(),
      default_stat: AssetStat::new(category.to_string(), ret, vol, beta),
    }
  }
}

impl RiskModel {
  /// Build a validated model from a configuration object.
  pub fn from_config(config: RiskModelConfig) -> Result<Self> {
    config.validate().context("invalid risk model configuration")?;
    let default_stat = config
      .category_stats
      .get(&config.default_category)
      .cloned()
      .with_context(|| format!("default category '{}' is missing", config.default_category))?;

    Ok(Self {
      config,
      default_stat,
    })
  }

  /// Build a validated model from JSON text.
  pub fn from_json_str(json: &str) -> Result<Self> {
    let config: RiskModelConfig =
      serde_json::from_str(json).context("failed to parse risk model JSON")?;
    Self::from_config(config)
  }

  /// Build a validated model from a JSON file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
      .with_context(|| format!("failed to read risk model from {}", path.display()))?;
    Self::from_json_str(&json).with_context(|| format!("in {}", path.display()))
  }

  /// Borrow the underlying configuration.
  pub fn config(&self) -> &RiskModelConfig {
    &self.config
  }

  /// Statistics for `category`, or the default entry when unknown.
  pub fn stats_for(&self, category: &str) -> &AssetStat {
    match self.config.category_stats.get(category) {
      Some(stat) => stat,
      None => {
        trace!(category, "unknown category, using default statistics");
        self.default_stat()
      }
    }
  }

  /// The fallback statistics entry.
  pub fn default_stat(&self) -> &AssetStat {
    &self.default_stat
  }

  /// Correlation between two categories, [`FALLBACK_CORRELATION`] when unknown.
  ///
  /// A category is always perfectly correlated with itself, listed or not.
  pub fn correlation(&self, a: &str, b: &str) -> f64 {
    if a == b {
      return 1.0;
    }
    match self.config.correlations.get(a).and_then(|row| row.get(b)) {
      Some(&rho) => rho,
      None => {
        trace!(a, b, "unknown correlation pair, using fallback");
        FALLBACK_CORRELATION
      }
    }
  }

  /// Whether `category` has its own statistics entry.
  pub fn is_known(&self, category: &str) -> bool {
    self.config.category_stats.contains_key(category)
  }

  /// Known categories (excluding the default entry), sorted by name.
  pub fn categories(&self) -> Vec<&str> {
    let mut out: Vec<&str> = self
      .config
      .category_stats
      .keys()
      .filter(|c| **c != self.config.default_category)
      .map(String::as_str)
      .collect();
    out.sort_unstable();
    out
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use approx::assert_abs_diff_eq;
  use tracing_test::traced_test;

  use super::*;

  #[test]
  fn known_category_resolves_to_its_row() {
    let model = RiskModel::default();
    let bonds = model.stats_for("Bonds");

    assert_eq!(bonds.category, "Bonds");
    assert_abs_diff_eq!(bonds.expected_return, 4.2);
    assert_abs_diff_eq!(bonds.volatility, 6.5);
    assert_abs_diff_eq!(bonds.beta, 0.15);
    assert!(model.is_known("Bonds"));
    assert!(!model.is_known("Fine Art"));
  }

  #[traced_test]
  #[test]
  fn unknown_category_falls_back_to_default() {
    let model = RiskModel::default();
    let stat = model.stats_for("Collectible Sneakers");

    assert_eq!(stat.category, DEFAULT_CATEGORY);
    assert_abs_diff_eq!(stat.expected_return, 8.0);
    assert_abs_diff_eq!(stat.volatility, 20.0);
    assert_abs_diff_eq!(stat.beta, 1.0);
    assert!(logs_contain("unknown category"));
  }

  #[test]
  fn correlation_is_symmetric_over_the_builtin_table() {
    let model = RiskModel::default();
    let categories = model.categories();
    assert_eq!(categories.len(), 8);

    for a in &categories {
      assert_eq!(model.correlation(a, a), 1.0);
      for b in &categories {
        assert_eq!(model.correlation(a, b), model.correlation(b, a));
      }
    }
    assert_abs_diff_eq!(model.correlation("Bonds", "US Stocks"), -0.1);
  }

  #[test]
  fn unknown_pair_falls_back() {
    let model = RiskModel::default();

    assert_eq!(model.correlation("Bonds", "Art"), FALLBACK_CORRELATION);
    assert_eq!(model.correlation("Art", "Bonds"), FALLBACK_CORRELATION);
    assert_eq!(model.correlation(DEFAULT_CATEGORY, "Bonds"), FALLBACK_CORRELATION);
  }

  #[test]
  fn every_category_is_perfectly_self_correlated() {
    let model = RiskModel::default();

    assert_eq!(model.correlation(DEFAULT_CATEGORY, DEFAULT_CATEGORY), 1.0);
    assert_eq!(model.correlation("Art", "Art"), 1.0);

    let row = &model.config().correlations[DEFAULT_CATEGORY];
    assert_eq!(row.len(), 9);
    for category in model.categories() {
      assert_eq!(row[category], FALLBACK_CORRELATION);
    }
  }

  #[test]
  fn missing_default_row_is_rejected() {
    let mut config = RiskModelConfig::default();
    config.correlations.remove(DEFAULT_CATEGORY);
    for row in config.correlations.values_mut() {
      row.remove(DEFAULT_CATEGORY);
    }

    let err = RiskModel::from_config(config).unwrap_err();
    assert!(format!("{err:#}").contains("'Default'"));
  }

  #[test]
  fn builtin_config_is_valid() {
    assert!(RiskModelConfig::default().validate().is_ok());
  }

  #[test]
  fn config_round_trips_through_json() {
    let json = serde_json::to_string(&RiskModelConfig::default()).unwrap();
    assert!(json.contains("categoryStats"));
    assert!(json.contains("expectedReturn"));

    let model = RiskModel::from_json_str(&json).unwrap();
    assert_abs_diff_eq!(model.stats_for("Crypto").volatility, 65.0);
    assert_abs_diff_eq!(model.correlation("Crypto", "US Stocks"), 0.4);
  }

  #[test]
  fn missing_default_category_is_rejected() {
    let mut config = RiskModelConfig::default();
    config.category_stats.remove(DEFAULT_CATEGORY);

    let err = RiskModel::from_config(config).unwrap_err();
    assert!(format!("{err:#}").contains("default category"));
  }

  #[test]
  fn asymmetric_correlation_is_rejected() {
    let mut config = RiskModelConfig::default();
    config
      .correlations
      .get_mut("Bonds")
      .unwrap()
      .insert("US Stocks".to_string(), 0.3);

    let err = RiskModel::from_config(config).unwrap_err();
    assert!(format!("{err:#}").contains("correlation("));
  }

  #[test]
  fn incomplete_row_is_rejected() {
    let mut config = RiskModelConfig::default();
    config.correlations.get_mut("Bonds").unwrap().remove("Crypto");
    config.correlations.get_mut("Crypto").unwrap().remove("Bonds");

    let err = RiskModel::from_config(config).unwrap_err();
    assert!(format!("{err:#}").contains("missing column"));
  }

  #[test]
  fn out_of_range_and_bad_volatility_are_rejected() {
    let mut config = RiskModelConfig::default();
    for row in ["Bonds", "Crypto"] {
      let other = if row == "Bonds" { "Crypto" } else { "Bonds" };
      config
        .correlations
        .get_mut(row)
        .unwrap()
        .insert(other.to_string(), 1.5);
    }
    assert!(RiskModel::from_config(config).is_err());

    let mut config = RiskModelConfig::default();
    config.category_stats.get_mut("Bonds").unwrap().volatility = 0.0;
    let err = RiskModel::from_config(config).unwrap_err();
    assert!(format!("{err:#}").contains("non-positive volatility"));
  }

  #[test]
  fn loads_minimal_model_from_file() {
    let json = r#"{
      "categoryStats": {
        "Gold": { "category": "Gold", "expectedReturn": 5.0, "volatility": 15.0, "beta": 0.1 },
        "Stocks": { "category": "Stocks", "expectedReturn": 9.0, "volatility": 17.0, "beta": 1.0 },
        "Default": { "category": "Default", "expectedReturn": 8.0, "volatility": 20.0, "beta": 1.0 }
      },
      "correlations": {
        "Gold": { "Gold": 1.0, "Stocks": 0.1, "Default": 0.5 },
        "Stocks": { "Gold": 0.1, "Stocks": 1.0, "Default": 0.5 },
        "Default": { "Gold": 0.5, "Stocks": 0.5, "Default": 1.0 }
      }
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let model = RiskModel::from_path(file.path()).unwrap();
    assert_eq!(model.config().default_category, DEFAULT_CATEGORY);
    assert_eq!(model.categories(), vec!["Gold", "Stocks"]);
    assert_abs_diff_eq!(model.correlation("Stocks", "Gold"), 0.1);
    assert_abs_diff_eq!(model.stats_for("Bonds").volatility, 20.0);
  }

  #[test]
  fn missing_file_reports_path() {
    let err = RiskModel::from_path("/nonexistent/risk-model.json").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/risk-model.json"));
  }
}
