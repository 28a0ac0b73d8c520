use super::clock::Clock;
use super::domain::{Candidate, JobPosting};
use super::scoring::{CandidateEvaluation, CompositeScorer, ScoreBreakdown, ScoringWeights};
use super::skills::{MatchOptions, SkillMatch};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Key the ranked pool is ordered by, highest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    PriorityScore,
    SkillMatch,
    Experience,
    /// Most recent `applied_at` first; candidates without one sort last.
    Recency,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriorityScore => "priority_score",
            Self::SkillMatch => "skill_match",
            Self::Experience => "experience",
            Self::Recency => "recency",
        }
    }

    /// Accepts snake_case or kebab-case names, case-insensitively.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "priority_score" | "priority" | "score" => Some(Self::PriorityScore),
            "skill_match" | "skills" | "skill" => Some(Self::SkillMatch),
            "experience" => Some(Self::Experience),
            "recency" | "applied_at" => Some(Self::Recency),
            _ => None,
        }
    }
}

/// Per-call ranking configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    pub weights: ScoringWeights,
    pub sort_by: SortKey,
    pub include_breakdown: bool,
    pub include_skill_detail: bool,
    pub match_options: MatchOptions,
}

impl RankOptions {
    /// Options requesting every optional detail on each ranked entry.
    pub fn detailed(weights: ScoringWeights) -> Self {
        Self {
            weights,
            include_breakdown: true,
            include_skill_detail: true,
            ..Self::default()
        }
    }
}

/// A candidate placed in the ranked pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub priority_score: u8,
    pub rank: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_match: Option<SkillMatch>,
}

struct Scored<'a> {
    candidate: &'a Candidate,
    evaluation: CandidateEvaluation,
}

/// Scores and orders a candidate pool against one job posting.
///
/// The engine holds nothing but its clock. Each call reads the clock once, so every
/// candidate in a pool is scored against the same instant.
#[derive(Debug, Clone)]
pub struct RankingEngine<C> {
    clock: C,
}

impl<C: Clock> RankingEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn rank(
        &self,
        candidates: &[Candidate],
        job: &JobPosting,
        options: &RankOptions,
    ) -> Vec<RankedCandidate> {
        let now = self.clock.now();
        let scorer = CompositeScorer::new(options.weights).with_match_options(options.match_options);

        let mut scored: Vec<Scored<'_>> = candidates
            .iter()
            .map(|candidate| Scored {
                candidate,
                evaluation: scorer.evaluate(candidate, job, now),
            })
            .collect();

        // `sort_by` is stable, so ties keep their input order.
        scored.sort_by(|a, b| compare_descending(options.sort_by, a, b));

        debug!(
            job_id = %job.id,
            candidates = scored.len(),
            sort_by = options.sort_by.label(),
            "ranked candidate pool"
        );

        scored
            .into_iter()
            .enumerate()
            .map(|(index, scored)| {
                let CandidateEvaluation {
                    breakdown,
                    skill_match,
                } = scored.evaluation;

                RankedCandidate {
                    candidate: scored.candidate.clone(),
                    priority_score: breakdown.total_score,
                    rank: index + 1,
                    breakdown: options.include_breakdown.then_some(breakdown),
                    skill_match: options.include_skill_detail.then_some(skill_match),
                }
            })
            .collect()
    }
}

fn compare_descending(sort_by: SortKey, a: &Scored<'_>, b: &Scored<'_>) -> Ordering {
    let (left, right) = (&a.evaluation.breakdown, &b.evaluation.breakdown);
    match sort_by {
        SortKey::PriorityScore => right.total_score.cmp(&left.total_score),
        SortKey::SkillMatch => right.skill.score.total_cmp(&left.skill.score),
        SortKey::Experience => right.experience.score.total_cmp(&left.experience.score),
        SortKey::Recency => b.candidate.applied_at.cmp(&a.candidate.applied_at),
    }
}
