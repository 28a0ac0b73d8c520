//! Candidate ranking pipeline: per-factor scorers, the weighted composite, pool ranking,
//! and population insights. Every entry point is a pure function of its inputs plus the
//! injected clock.

pub mod clock;
pub mod domain;
pub mod engine;
pub mod experience;
pub mod factors;
pub mod insights;
pub mod scoring;
pub mod skills;

pub use clock::{Clock, FixedClock};
pub use domain::{Candidate, CandidateId, JobId, JobPosting};
pub use engine::{RankOptions, RankedCandidate, RankingEngine, SortKey};
pub use insights::{
    InsightAggregator, InsightsReport, Recommendation, RecommendationSeverity, ScoreDistribution,
    SkillGap,
};
pub use scoring::{CompositeScorer, Factor, FactorScore, ScoreBreakdown, ScoringWeights};
pub use skills::{match_skills, tag_matches, MatchOptions, PartialMatch, SkillMatch};
