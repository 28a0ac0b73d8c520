use super::super::domain::JobId;
use super::super::engine::RankedCandidate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSeverity {
    Warning,
    Info,
}

impl RecommendationSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: RecommendationSeverity,
    pub message: String,
}

/// Required tag held by fewer than half of the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub coverage: f64,
    pub candidates_with_skill: usize,
}

/// Priority score counts: excellent >= 90, good 80-89, fair 60-79, poor < 60.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl ScoreDistribution {
    pub fn record(&mut self, score: u8) {
        match score {
            90.. => self.excellent += 1,
            80..=89 => self.good += 1,
            60..=79 => self.fair += 1,
            _ => self.poor += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.poor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub job_id: JobId,
    pub job_title: String,
    pub total_candidates: usize,
    pub average_score: f64,
    pub top_candidates: Vec<RankedCandidate>,
    pub skill_gaps: Vec<SkillGap>,
    pub recommendations: Vec<Recommendation>,
    pub score_distribution: ScoreDistribution,
}
