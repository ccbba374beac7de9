//! Summary statistics over per-pair scores

use serde::{Deserialize, Serialize};

/// Mean, confidence half-width and standard deviation of a score list
///
/// The half-width is `z * std_dev / count`, where `count` is the number of
/// scores actually recorded (skipped pairs excluded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    pub mean: f32,
    pub ci_half_width: f32,
    pub std_dev: f32,
    /// Number of scores the statistics were computed over
    pub count: usize,
}

impl ScoreStatistics {
    /// Statistics for an empty score list: all zeros
    pub fn empty() -> Self {
        Self {
            mean: 0.0,
            ci_half_width: 0.0,
            std_dev: 0.0,
            count: 0,
        }
    }

    /// `(mean, ci_half_width, std_dev)`
    pub fn as_tuple(&self) -> (f32, f32, f32) {
        (self.mean, self.ci_half_width, self.std_dev)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Format as `mean ± half-width (std)`
    pub fn format_summary(&self) -> String {
        format!(
            "{:.4} ± {:.4} (std: {:.4}, n: {})",
            self.mean, self.ci_half_width, self.std_dev, self.count
        )
    }
}

/// Compute summary statistics over a score list
///
/// An empty list yields `ScoreStatistics::empty()`.
pub fn compute_statistics(scores: &[f32], confidence_z: f32) -> ScoreStatistics {
    if scores.is_empty() {
        return ScoreStatistics::empty();
    }

    let count = scores.len();
    let std = std_dev(scores);
    ScoreStatistics {
        mean: mean(scores),
        ci_half_width: confidence_z * std / count as f32,
        std_dev: std,
        count,
    }
}

/// Arithmetic mean (0 for an empty list)
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Calculate population standard deviation
pub fn std_dev(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n;
    variance.sqrt()
}
