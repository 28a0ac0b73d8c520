pub mod views;

pub use views::{
    InsightsReport, Recommendation, RecommendationSeverity, ScoreDistribution, SkillGap,
};

use super::clock::Clock;
use super::domain::{Candidate, JobPosting};
use super::engine::{RankOptions, RankedCandidate, RankingEngine};
use super::scoring::ScoringWeights;
use super::skills::{round_to_hundredths, tag_matches, MatchOptions};
use std::collections::HashSet;
use tracing::debug;

const TOP_CANDIDATE_THRESHOLD: u8 = 80;
const TOP_CANDIDATE_LIMIT: usize = 5;
const SKILL_GAP_COVERAGE: f64 = 50.0;
const WEAK_POOL_AVERAGE: f64 = 60.0;

/// Builds population-level hiring insights on top of a ranked pool.
#[derive(Debug, Clone)]
pub struct InsightAggregator<C> {
    engine: RankingEngine<C>,
    weights: ScoringWeights,
    match_options: MatchOptions,
}

impl<C: Clock> InsightAggregator<C> {
    pub fn new(engine: RankingEngine<C>) -> Self {
        Self {
            engine,
            weights: ScoringWeights::default(),
            match_options: MatchOptions::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_match_options(mut self, match_options: MatchOptions) -> Self {
        self.match_options = match_options;
        self
    }

    pub fn aggregate(&self, candidates: &[Candidate], job: &JobPosting) -> InsightsReport {
        let options = RankOptions {
            match_options: self.match_options,
            ..RankOptions::detailed(self.weights)
        };
        let ranked = self.engine.rank(candidates, job, &options);

        let report = summarize(&ranked, job, &self.match_options);
        debug!(
            job_id = %job.id,
            candidates = report.total_candidates,
            average_score = report.average_score,
            skill_gaps = report.skill_gaps.len(),
            "aggregated candidate insights"
        );
        report
    }
}

fn summarize(
    ranked: &[RankedCandidate],
    job: &JobPosting,
    match_options: &MatchOptions,
) -> InsightsReport {
    let total_candidates = ranked.len();
    let mean_score = if total_candidates == 0 {
        0.0
    } else {
        let sum: f64 = ranked.iter().map(|entry| f64::from(entry.priority_score)).sum();
        sum / total_candidates as f64
    };

    let top_candidates: Vec<RankedCandidate> = ranked
        .iter()
        .filter(|entry| entry.priority_score >= TOP_CANDIDATE_THRESHOLD)
        .take(TOP_CANDIDATE_LIMIT)
        .cloned()
        .collect();

    let mut score_distribution = ScoreDistribution::default();
    for entry in ranked {
        score_distribution.record(entry.priority_score);
    }

    let skill_gaps = skill_gaps(ranked, job, match_options);
    let recommendations = if total_candidates == 0 {
        Vec::new()
    } else {
        recommend(top_candidates.is_empty(), &skill_gaps, mean_score)
    };

    InsightsReport {
        job_id: job.id.clone(),
        job_title: job.title.clone(),
        total_candidates,
        average_score: round_to_hundredths(mean_score),
        top_candidates,
        skill_gaps,
        recommendations,
        score_distribution,
    }
}

fn skill_gaps(
    ranked: &[RankedCandidate],
    job: &JobPosting,
    match_options: &MatchOptions,
) -> Vec<SkillGap> {
    if ranked.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut gaps: Vec<(f64, SkillGap)> = job
        .tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| {
            let key = if match_options.case_sensitive {
                tag.to_string()
            } else {
                tag.to_lowercase()
            };
            seen.insert(key)
        })
        .map(|tag| coverage_for(ranked, tag, match_options))
        .filter(|(coverage, _)| *coverage < SKILL_GAP_COVERAGE)
        .collect();

    // Threshold and ordering use the unrounded ratio; only the reported value is rounded.
    gaps.sort_by(|a, b| a.0.total_cmp(&b.0));
    gaps.into_iter().map(|(_, gap)| gap).collect()
}

fn coverage_for(
    ranked: &[RankedCandidate],
    tag: &str,
    match_options: &MatchOptions,
) -> (f64, SkillGap) {
    let candidates_with_skill = ranked
        .iter()
        .filter(|entry| tag_matches(&entry.candidate.skills, tag, match_options))
        .count();
    let coverage = candidates_with_skill as f64 / ranked.len() as f64 * 100.0;

    (
        coverage,
        SkillGap {
            skill: tag.to_string(),
            coverage: round_to_hundredths(coverage),
            candidates_with_skill,
        },
    )
}

fn recommend(
    no_top_candidates: bool,
    skill_gaps: &[SkillGap],
    mean_score: f64,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if no_top_candidates {
        recommendations.push(Recommendation {
            severity: RecommendationSeverity::Warning,
            message: format!(
                "No candidate scored {TOP_CANDIDATE_THRESHOLD} or above; widen sourcing or revisit the required skills"
            ),
        });
    }

    if !skill_gaps.is_empty() {
        let skills = skill_gaps
            .iter()
            .map(|gap| gap.skill.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        recommendations.push(Recommendation {
            severity: RecommendationSeverity::Info,
            message: format!(
                "{} required skill{} covered by fewer than half of applicants: {}",
                skill_gaps.len(),
                if skill_gaps.len() == 1 { " is" } else { "s are" },
                skills
            ),
        });
    }

    if mean_score < WEAK_POOL_AVERAGE {
        recommendations.push(Recommendation {
            severity: RecommendationSeverity::Warning,
            message: format!(
                "Average candidate score is {mean_score:.2}; the pool is a weak fit for this posting"
            ),
        });
    }

    recommendations
}
