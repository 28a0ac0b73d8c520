use candidate_ranking::ranking::{
    match_skills, Candidate, FixedClock, InsightAggregator, JobPosting, MatchOptions, RankOptions,
    RankingEngine, ScoringWeights, SortKey,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

const SKILLS: &[&str] = &[
    "Cooking",
    "Restaurant",
    "Food Preparation",
    "English",
    "Driving",
    "Logistics",
    "Java",
    "JavaScript",
    "Customer Service",
];
const EXPERIENCE: &[&str] = &[
    "",
    "5 years as chef",
    "2 yrs driving logistics",
    "10+ years restaurant cooking",
    "fresh graduate",
];
const CATEGORIES: &[&str] = &["Kitchen", "Transport"];
const EDUCATION: &[&str] = &["", "PhD", "Masters", "Bachelor", "+2", "SLC", "none"];
const AVAILABILITY: &[&str] = &[
    "",
    "Immediate",
    "within 1 week",
    "within 2 weeks",
    "within 3 months",
    "next year",
];

fn skill_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(SKILLS), 0..5)
        .prop_map(|skills| skills.into_iter().map(str::to_string).collect())
}

fn candidate_strategy() -> impl Strategy<Value = Candidate> {
    (
        skill_list(),
        prop::sample::select(EXPERIENCE),
        prop::sample::select(EDUCATION),
        prop::sample::select(AVAILABILITY),
        prop::option::of(0i64..90),
    )
        .prop_map(|(skills, experience, education, availability, days_ago)| Candidate {
            skills,
            experience: experience.to_string(),
            education: education.to_string(),
            availability: availability.to_string(),
            applied_at: days_ago.map(|days| now() - Duration::days(days)),
            ..Candidate::new("pending", "Applicant")
        })
}

fn pool_strategy() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(candidate_strategy(), 0..12).prop_map(|pool| {
        pool.into_iter()
            .enumerate()
            .map(|(index, mut candidate)| {
                candidate.id.0 = format!("cand-{index}");
                candidate
            })
            .collect()
    })
}

fn job_strategy() -> impl Strategy<Value = JobPosting> {
    (skill_list(), prop::option::of(prop::sample::select(CATEGORIES)))
        .prop_map(|(tags, category)| JobPosting {
            tags,
            category: category.map(str::to_string),
            ..JobPosting::new("job", "Opening")
        })
}

fn weights_strategy() -> impl Strategy<Value = ScoringWeights> {
    (-1.0f64..2.0, -1.0f64..2.0, -1.0f64..2.0, -1.0f64..2.0, -1.0f64..2.0).prop_map(
        |(skill, experience, education, availability, recency)| ScoringWeights {
            skill,
            experience,
            education,
            availability,
            recency,
        },
    )
}

fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop::sample::select(vec![
        SortKey::PriorityScore,
        SortKey::SkillMatch,
        SortKey::Experience,
        SortKey::Recency,
    ])
}

proptest! {
    #[test]
    fn empty_skills_miss_every_tag(tags in prop::collection::vec(prop::sample::select(SKILLS), 1..6)) {
        let result = match_skills::<String, &str>(&[], &tags, &MatchOptions::default());
        prop_assert_eq!(result.score, 0.0);
        prop_assert_eq!(result.missing_skills, tags.iter().map(|tag| tag.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn priority_score_stays_within_bounds(
        pool in pool_strategy(),
        job in job_strategy(),
        weights in weights_strategy(),
    ) {
        let engine = RankingEngine::new(FixedClock::new(now()));
        let options = RankOptions { weights, ..RankOptions::default() };
        for entry in engine.rank(&pool, &job, &options) {
            prop_assert!(entry.priority_score <= 100);
        }
    }

    #[test]
    fn ranking_is_a_sorted_permutation_with_contiguous_ranks(
        pool in pool_strategy(),
        job in job_strategy(),
        sort_by in sort_key_strategy(),
    ) {
        let engine = RankingEngine::new(FixedClock::new(now()));
        let options = RankOptions {
            sort_by,
            include_breakdown: true,
            ..RankOptions::default()
        };
        let ranked = engine.rank(&pool, &job, &options);

        prop_assert_eq!(ranked.len(), pool.len());
        let input_ids: HashSet<_> = pool.iter().map(|candidate| candidate.id.clone()).collect();
        let output_ids: HashSet<_> = ranked.iter().map(|entry| entry.candidate.id.clone()).collect();
        prop_assert_eq!(input_ids, output_ids);

        let ranks: Vec<usize> = ranked.iter().map(|entry| entry.rank).collect();
        prop_assert_eq!(ranks, (1..=pool.len()).collect::<Vec<_>>());

        for pair in ranked.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let (lb, rb) = (
                left.breakdown.expect("breakdown requested"),
                right.breakdown.expect("breakdown requested"),
            );
            match sort_by {
                SortKey::PriorityScore => {
                    prop_assert!(left.priority_score >= right.priority_score);
                }
                SortKey::SkillMatch => {
                    prop_assert!(lb.skill.score >= rb.skill.score);
                }
                SortKey::Experience => {
                    prop_assert!(lb.experience.score >= rb.experience.score);
                }
                SortKey::Recency => {
                    prop_assert!(left.candidate.applied_at >= right.candidate.applied_at);
                }
            }
        }
    }

    #[test]
    fn ranking_is_idempotent(pool in pool_strategy(), job in job_strategy()) {
        let engine = RankingEngine::new(FixedClock::new(now()));
        let options = RankOptions::detailed(ScoringWeights::default());
        prop_assert_eq!(engine.rank(&pool, &job, &options), engine.rank(&pool, &job, &options));
    }

    #[test]
    fn skill_gaps_stay_below_half_coverage(pool in pool_strategy(), job in job_strategy()) {
        let aggregator = InsightAggregator::new(RankingEngine::new(FixedClock::new(now())));
        let report = aggregator.aggregate(&pool, &job);

        prop_assert_eq!(report.total_candidates, pool.len());
        prop_assert_eq!(report.score_distribution.total(), pool.len());
        prop_assert!(report.top_candidates.len() <= 5);
        prop_assert!(report.top_candidates.iter().all(|entry| entry.priority_score >= 80));
        prop_assert!(report.skill_gaps.iter().all(|gap| gap.coverage < 50.0));
        prop_assert!(report.skill_gaps.windows(2).all(|pair| pair[0].coverage <= pair[1].coverage));
        prop_assert!(report.average_score.is_finite());
    }
}
