use serde::{Deserialize, Serialize};

/// Per-factor weights applied by the composite scorer.
///
/// Weights are taken as supplied. They are not renormalized, so a set that does not sum
/// to 1.0 shifts the achievable maximum; the total score is still clamped to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub availability: f64,
    pub recency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            experience: 0.3,
            education: 0.1,
            availability: 0.1,
            recency: 0.1,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.experience + self.education + self.availability + self.recency
    }

    /// Highest total reachable before clamping when every factor scores 100.
    pub fn achievable_maximum(&self) -> f64 {
        self.sum() * 100.0
    }
}
