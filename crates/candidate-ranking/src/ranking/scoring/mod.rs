mod weights;

pub use weights::ScoringWeights;

use super::domain::{Candidate, JobPosting};
use super::experience::score_experience;
use super::factors::{score_availability, score_education, score_recency};
use super::skills::{match_skills, MatchOptions, SkillMatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Factors blended into the priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Skill,
    Experience,
    Education,
    Availability,
    Recency,
}

impl Factor {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Skill,
            Self::Experience,
            Self::Education,
            Self::Availability,
            Self::Recency,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Skill => "Skill Match",
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Availability => "Availability",
            Self::Recency => "Application Recency",
        }
    }
}

/// One factor's raw score, the weight applied to it, and its rounded contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub score: f64,
    pub weight: f64,
    pub contribution: i32,
}

impl FactorScore {
    fn weighted(score: f64, weight: f64) -> Self {
        Self {
            score,
            weight,
            contribution: (score * weight).round() as i32,
        }
    }

    fn raw(&self) -> f64 {
        self.score * self.weight
    }
}

/// Traceable composition of a priority score.
///
/// Contributions are rounded one by one, so their sum can differ from `total_score` by a
/// point or two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skill: FactorScore,
    pub experience: FactorScore,
    pub education: FactorScore,
    pub availability: FactorScore,
    pub recency: FactorScore,
    pub total_score: u8,
}

impl ScoreBreakdown {
    pub fn factor(&self, factor: Factor) -> &FactorScore {
        match factor {
            Factor::Skill => &self.skill,
            Factor::Experience => &self.experience,
            Factor::Education => &self.education,
            Factor::Availability => &self.availability,
            Factor::Recency => &self.recency,
        }
    }

    pub fn entries(&self) -> [(Factor, &FactorScore); 5] {
        Factor::ordered().map(|factor| (factor, self.factor(factor)))
    }

    pub fn contribution_sum(&self) -> i32 {
        self.entries()
            .iter()
            .map(|(_, entry)| entry.contribution)
            .sum()
    }
}

/// Breakdown plus the skill match it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvaluation {
    pub breakdown: ScoreBreakdown,
    pub skill_match: SkillMatch,
}

/// Stateless scorer that blends the individual factor scorers with configured weights.
#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    weights: ScoringWeights,
    match_options: MatchOptions,
}

impl CompositeScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            match_options: MatchOptions::default(),
        }
    }

    pub fn with_match_options(mut self, match_options: MatchOptions) -> Self {
        self.match_options = match_options;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(
        &self,
        candidate: &Candidate,
        job: &JobPosting,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        self.evaluate(candidate, job, now).breakdown
    }

    pub fn evaluate(
        &self,
        candidate: &Candidate,
        job: &JobPosting,
        now: DateTime<Utc>,
    ) -> CandidateEvaluation {
        let weights = &self.weights;
        let skill_match = match_skills(&candidate.skills, &job.tags, &self.match_options);

        let skill = FactorScore::weighted(skill_match.percentage, weights.skill);
        let experience = FactorScore::weighted(
            score_experience(&candidate.experience, &job.tags, job.category.as_deref()).into(),
            weights.experience,
        );
        let education =
            FactorScore::weighted(score_education(&candidate.education).into(), weights.education);
        let availability = FactorScore::weighted(
            score_availability(&candidate.availability).into(),
            weights.availability,
        );
        let recency = FactorScore::weighted(
            score_recency(candidate.applied_at, now).into(),
            weights.recency,
        );

        let weighted_sum =
            skill.raw() + experience.raw() + education.raw() + availability.raw() + recency.raw();
        let total_score = weighted_sum.round().clamp(0.0, 100.0) as u8;

        CandidateEvaluation {
            breakdown: ScoreBreakdown {
                skill,
                experience,
                education,
                availability,
                recency,
                total_score,
            },
            skill_match,
        }
    }
}
