use candidate_ranking::config::RankingConfig;
use candidate_ranking::error::AppError;
use candidate_ranking::import::{parse_timestamp, CandidateCsvImporter};
use candidate_ranking::ranking::{Candidate, Clock, FixedClock, JobPosting, SortKey};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) ranking: RankingConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

impl AppState {
    /// Pins a request to one instant: the caller's `now` when given, the host clock otherwise.
    pub(crate) fn clock_for(&self, now: Option<DateTime<Utc>>) -> FixedClock {
        FixedClock::new(now.unwrap_or_else(|| self.clock.now()))
    }
}

/// Wall clock used by the running host.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}

pub(crate) fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    SortKey::from_name(raw).ok_or_else(|| {
        format!("unknown sort key '{raw}' (expected priority-score, skill-match, experience or recency)")
    })
}

pub(crate) fn load_job(path: &Path) -> Result<JobPosting, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_candidates_json(path: &Path) -> Result<Vec<Candidate>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_candidates_csv(path: &Path) -> Result<Vec<Candidate>, AppError> {
    Ok(CandidateCsvImporter::from_path(path)?)
}
