use crate::infra::{
    load_candidates_csv, load_candidates_json, load_job, parse_instant, parse_sort_key,
    SystemClock,
};
use candidate_ranking::config::AppConfig;
use candidate_ranking::error::AppError;
use candidate_ranking::ranking::{
    Candidate, Clock, FixedClock, InsightAggregator, InsightsReport, JobPosting, RankOptions,
    RankedCandidate, RankingEngine, ScoreBreakdown, ScoringWeights, SortKey,
};
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PoolArgs {
    /// Job posting JSON document
    #[arg(long)]
    pub(crate) job: PathBuf,
    /// Candidate pool as a JSON array
    #[arg(long, required_unless_present = "candidates_csv", conflicts_with = "candidates_csv")]
    pub(crate) candidates: Option<PathBuf>,
    /// Candidate pool as an applicant CSV export
    #[arg(long)]
    pub(crate) candidates_csv: Option<PathBuf>,
    /// Reference instant for recency scoring (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Emit JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    #[command(flatten)]
    pub(crate) pool: PoolArgs,
    /// Ordering key: priority-score, skill-match, experience or recency
    #[arg(long, value_parser = parse_sort_key)]
    pub(crate) sort_by: Option<SortKey>,
    /// Show per-factor score contributions
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct InsightsArgs {
    #[command(flatten)]
    pub(crate) pool: PoolArgs,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        pool,
        sort_by,
        breakdown,
    } = args;

    let config = AppConfig::load()?;
    let (job, candidates) = load_pool(&pool)?;

    let mut options = config.ranking.rank_options();
    if let Some(sort_by) = sort_by {
        options.sort_by = sort_by;
    }
    options.include_breakdown = breakdown;
    options.include_skill_detail = breakdown;

    let engine = RankingEngine::new(resolve_clock(pool.now));
    let ranked = engine.rank(&candidates, &job, &options);

    if pool.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        render_ranking(&job, &options, &ranked);
    }

    Ok(())
}

pub(crate) fn run_insights(args: InsightsArgs) -> Result<(), AppError> {
    let InsightsArgs { pool } = args;

    let config = AppConfig::load()?;
    let (job, candidates) = load_pool(&pool)?;

    let engine = RankingEngine::new(resolve_clock(pool.now));
    let report = InsightAggregator::new(engine)
        .with_weights(config.ranking.weights)
        .aggregate(&candidates, &job);

    if pool.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_insights(&report);
    }

    Ok(())
}

fn load_pool(args: &PoolArgs) -> Result<(JobPosting, Vec<Candidate>), AppError> {
    let job = load_job(&args.job)?;
    let candidates = match (&args.candidates, &args.candidates_csv) {
        (Some(path), _) => load_candidates_json(path)?,
        (None, Some(path)) => load_candidates_csv(path)?,
        (None, None) => Vec::new(),
    };
    Ok((job, candidates))
}

fn resolve_clock(now: Option<DateTime<Utc>>) -> FixedClock {
    FixedClock::new(now.unwrap_or_else(|| SystemClock.now()))
}

fn render_ranking(job: &JobPosting, options: &RankOptions, ranked: &[RankedCandidate]) {
    println!(
        "Ranking {} candidate{} for {} ({}) by {}",
        ranked.len(),
        if ranked.len() == 1 { "" } else { "s" },
        job.title,
        job.id,
        options.sort_by.label()
    );
    if let Some(note) = weights_note(&options.weights) {
        println!("  note: {note}");
    }

    for entry in ranked {
        println!(
            "  #{:<3} {:>3}  {}  {}",
            entry.rank, entry.priority_score, entry.candidate.id, entry.candidate.name
        );

        if let Some(breakdown) = &entry.breakdown {
            for (factor, score) in breakdown.entries() {
                println!(
                    "        - {:<12} {:>5.1} x {:.2} = {}",
                    factor.label(),
                    score.score,
                    score.weight,
                    score.contribution
                );
            }
            println!("          {}", breakdown_footer(breakdown));
        }

        if let Some(skill_match) = &entry.skill_match {
            if !skill_match.missing_skills.is_empty() {
                println!("        missing: {}", skill_match.missing_skills.join(", "));
            }
        }
    }
}

/// Flags weight sets that do not sum to 1.0, since totals are clamped rather than rescaled.
fn weights_note(weights: &ScoringWeights) -> Option<String> {
    let sum = weights.sum();
    if (sum - 1.0).abs() < 1e-9 {
        return None;
    }

    Some(format!(
        "weights sum to {sum:.2}; totals top out at {:.0} before clamping to 0-100",
        weights.achievable_maximum()
    ))
}

fn breakdown_footer(breakdown: &ScoreBreakdown) -> String {
    format!(
        "contributions {} | total {}",
        breakdown.contribution_sum(),
        breakdown.total_score
    )
}

fn render_insights(report: &InsightsReport) {
    println!(
        "Candidate insights for {} ({})",
        report.job_title, report.job_id
    );
    println!(
        "- {} candidates | average score {:.2}",
        report.total_candidates, report.average_score
    );

    let distribution = &report.score_distribution;
    println!(
        "- Distribution: {} excellent | {} good | {} fair | {} poor",
        distribution.excellent, distribution.good, distribution.fair, distribution.poor
    );

    if report.top_candidates.is_empty() {
        println!("Top candidates: none");
    } else {
        println!("Top candidates:");
        for entry in &report.top_candidates {
            println!(
                "  - #{} {} ({}) score {}",
                entry.rank, entry.candidate.name, entry.candidate.id, entry.priority_score
            );
        }
    }

    if !report.skill_gaps.is_empty() {
        println!("Skill gaps:");
        for gap in &report.skill_gaps {
            println!(
                "  - {}: {:.2}% coverage ({} candidates)",
                gap.skill, gap.coverage, gap.candidates_with_skill
            );
        }
    }

    for recommendation in &report.recommendations {
        println!(
            "[{}] {}",
            recommendation.severity.label(),
            recommendation.message
        );
    }
}
