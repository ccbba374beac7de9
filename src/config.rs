//! Configuration for metric computation
//!
//! Defines the metrics.toml schema and the Metric enum.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Norm below which an aggregated vector is treated as the zero vector
pub const ZERO_NORM_EPSILON: f32 = 1e-11;

/// z-value for a 95% confidence interval
pub const DEFAULT_CONFIDENCE_Z: f32 = 1.96;

/// Embedding-based metric
///
/// - `Average`: summed token vectors, normalized
/// - `Extrema`: per-dimension extreme values
/// - `GreedyMatch`: token-to-token best matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Average,
    Extrema,
    GreedyMatch,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Extrema => "extrema",
            Self::GreedyMatch => "greedy_match",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "average" | "avg" | "embedding-average" => Some(Self::Average),
            "extrema" | "vector-extrema" => Some(Self::Extrema),
            "greedy" | "greedy_match" | "greedy-match" | "greedy-matching" => Some(Self::GreedyMatch),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Average => "Cosine of normalized summed sentence vectors",
            Self::Extrema => "Cosine of per-dimension extrema vectors",
            Self::GreedyMatch => "Symmetric mean of best token-to-token cosine matches",
        }
    }

    /// All metrics, in reporting order
    pub fn all() -> [Self; 3] {
        [Self::Average, Self::Extrema, Self::GreedyMatch]
    }
}

/// Metric computation settings loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Zero-vector detection threshold. Tune for embeddings with unusual scale.
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,

    /// Multiplier for the confidence half-width
    #[serde(default = "default_confidence_z")]
    pub confidence_z: f32,

    /// Score sentence pairs on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

fn default_epsilon() -> f32 { ZERO_NORM_EPSILON }
fn default_confidence_z() -> f32 { DEFAULT_CONFIDENCE_Z }

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            epsilon: ZERO_NORM_EPSILON,
            confidence_z: DEFAULT_CONFIDENCE_Z,
            parallel: false,
        }
    }
}

impl MetricsConfig {
    /// Load config from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metrics config: {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse metrics config: {:?}", path))
    }

    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default location (./metrics.toml) or return defaults
    pub fn load_default() -> Result<Self> {
        let local_path = Path::new("metrics.toml");
        if local_path.exists() {
            return Self::load(local_path);
        }
        Ok(Self::default())
    }

    /// Save config to TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Enable or disable parallel pair scoring
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Override the zero-vector threshold
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.epsilon.is_finite() && self.epsilon > 0.0,
            "epsilon must be a finite positive number, got {}",
            self.epsilon
        );
        anyhow::ensure!(
            self.confidence_z.is_finite() && self.confidence_z >= 0.0,
            "confidence_z must be a finite non-negative number, got {}",
            self.confidence_z
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_from_str() {
        assert_eq!(Metric::from_str("average"), Some(Metric::Average));
        assert_eq!(Metric::from_str("Extrema"), Some(Metric::Extrema));
        assert_eq!(Metric::from_str("greedy"), Some(Metric::GreedyMatch));
        assert_eq!(Metric::from_str("bleu"), None);
    }

    #[test]
    fn test_metric_names_round_trip() {
        for metric in Metric::all() {
            assert_eq!(Metric::from_str(metric.name()), Some(metric));
        }
    }

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert_eq!(config.epsilon, 1e-11);
        assert_eq!(config.confidence_z, 1.96);
        assert!(!config.parallel);
    }

    #[test]
    fn test_metrics_config_toml() {
        let toml_str = r#"
epsilon = 1e-6
parallel = true
"#;
        let config = MetricsConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.confidence_z, DEFAULT_CONFIDENCE_Z);
        assert!(config.parallel);
    }

    #[test]
    fn test_metrics_config_rejects_invalid_epsilon() {
        assert!(MetricsConfig::from_toml_str("epsilon = -1.0").is_err());
        assert!(MetricsConfig::from_toml_str("epsilon = 0.0").is_err());
    }

    #[test]
    fn test_metrics_config_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.toml");

        let config = MetricsConfig::default().with_parallel(true).with_epsilon(1e-8);
        config.save(&path).unwrap();

        let loaded = MetricsConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_metrics_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MetricsConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read metrics config"));
    }
}
