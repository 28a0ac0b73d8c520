use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use candidate_ranking::error::AppError;
use candidate_ranking::import::CandidateCsvImporter;
use candidate_ranking::ranking::{
    Candidate, InsightAggregator, InsightsReport, JobId, JobPosting, MatchOptions, RankOptions,
    RankedCandidate, RankingEngine, ScoringWeights, SortKey,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

/// Per-request overrides layered over the host's ranking defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RankingRequestOptions {
    pub(crate) weights: Option<ScoringWeights>,
    pub(crate) sort_by: Option<SortKey>,
    pub(crate) include_breakdown: bool,
    pub(crate) include_skill_detail: bool,
    pub(crate) match_options: MatchOptions,
}

impl RankingRequestOptions {
    fn resolve(self, defaults: RankOptions) -> RankOptions {
        RankOptions {
            weights: self.weights.unwrap_or(defaults.weights),
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            include_breakdown: self.include_breakdown,
            include_skill_detail: self.include_skill_detail,
            match_options: self.match_options,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankingRequest {
    pub(crate) job: JobPosting,
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
    /// Applicant CSV export appended after `candidates`.
    #[serde(default)]
    pub(crate) candidates_csv: Option<String>,
    #[serde(default)]
    pub(crate) options: RankingRequestOptions,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingResponse {
    pub(crate) job_id: JobId,
    pub(crate) sort_by: SortKey,
    pub(crate) candidates: Vec<RankedCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsightsRequest {
    pub(crate) job: JobPosting,
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
    #[serde(default)]
    pub(crate) candidates_csv: Option<String>,
    #[serde(default)]
    pub(crate) weights: Option<ScoringWeights>,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(crate) fn ranking_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/rankings",
            axum::routing::post(rankings_endpoint),
        )
        .route(
            "/api/v1/insights",
            axum::routing::post(insights_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rankings_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RankingRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    let RankingRequest {
        job,
        candidates,
        candidates_csv,
        options,
        now,
    } = payload;

    let pool = merge_pool(candidates, candidates_csv)?;
    let options = options.resolve(state.ranking.rank_options());
    let engine = RankingEngine::new(state.clock_for(now));
    let ranked = engine.rank(&pool, &job, &options);

    info!(
        job_id = %job.id,
        candidates = ranked.len(),
        sort_by = options.sort_by.label(),
        "ranked candidate pool"
    );

    Ok(Json(RankingResponse {
        job_id: job.id,
        sort_by: options.sort_by,
        candidates: ranked,
    }))
}

pub(crate) async fn insights_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<InsightsRequest>,
) -> Result<Json<InsightsReport>, AppError> {
    let InsightsRequest {
        job,
        candidates,
        candidates_csv,
        weights,
        now,
    } = payload;

    let pool = merge_pool(candidates, candidates_csv)?;
    let aggregator = InsightAggregator::new(RankingEngine::new(state.clock_for(now)))
        .with_weights(weights.unwrap_or(state.ranking.weights));
    let report = aggregator.aggregate(&pool, &job);

    info!(
        job_id = %job.id,
        candidates = report.total_candidates,
        average_score = report.average_score,
        "built candidate insights"
    );

    Ok(Json(report))
}

fn merge_pool(
    mut candidates: Vec<Candidate>,
    candidates_csv: Option<String>,
) -> Result<Vec<Candidate>, AppError> {
    if let Some(csv) = candidates_csv {
        let reader = Cursor::new(csv.into_bytes());
        candidates.extend(CandidateCsvImporter::from_reader(reader)?);
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use candidate_ranking::config::RankingConfig;
    use candidate_ranking::ranking::{FixedClock, RecommendationSeverity};
    use chrono::TimeZone;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn test_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            ranking: RankingConfig::default(),
            clock: Arc::new(FixedClock::new(now())),
        }
    }

    fn job() -> JobPosting {
        JobPosting {
            tags: vec!["Cooking".to_string(), "Food Safety".to_string()],
            category: Some("Kitchen".to_string()),
            ..JobPosting::new("job-cook", "Line Cook")
        }
    }

    fn pool() -> Vec<Candidate> {
        vec![
            Candidate {
                skills: vec!["Cooking".to_string()],
                experience: "1 year".to_string(),
                applied_at: Some(now() - chrono::Duration::days(20)),
                ..Candidate::new("cand-a", "Asha")
            },
            Candidate {
                skills: vec!["cooking".to_string(), "food safety".to_string()],
                experience: "6 years in kitchen".to_string(),
                education: "Diploma".to_string(),
                availability: "Immediate".to_string(),
                applied_at: Some(now()),
                ..Candidate::new("cand-b", "Bimal")
            },
        ]
    }

    fn ranking_request(options: RankingRequestOptions) -> RankingRequest {
        RankingRequest {
            job: job(),
            candidates: pool(),
            candidates_csv: None,
            options,
            now: None,
        }
    }

    #[tokio::test]
    async fn rankings_endpoint_orders_pool_with_host_defaults() {
        let Json(body) = rankings_endpoint(
            Extension(test_state(true)),
            Json(ranking_request(RankingRequestOptions::default())),
        )
        .await
        .expect("ranking succeeds");

        assert_eq!(body.job_id, JobId("job-cook".to_string()));
        assert_eq!(body.sort_by, SortKey::PriorityScore);
        let ids: Vec<_> = body
            .candidates
            .iter()
            .map(|entry| entry.candidate.id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["cand-b", "cand-a"]);
        assert_eq!(body.candidates[0].rank, 1);
        assert!(body.candidates[0].breakdown.is_none());
    }

    #[tokio::test]
    async fn rankings_endpoint_honours_request_options() {
        let options = RankingRequestOptions {
            sort_by: Some(SortKey::Recency),
            include_breakdown: true,
            ..RankingRequestOptions::default()
        };
        let mut request = ranking_request(options);
        request.candidates_csv = Some(
            "ID,Name,Skills,Experience,Education,Availability,Applied At\ncand-c,Chandra,Cooking,,,,2025-10-02\n"
                .to_string(),
        );

        let Json(body) = rankings_endpoint(Extension(test_state(true)), Json(request))
            .await
            .expect("ranking succeeds");

        let ids: Vec<_> = body
            .candidates
            .iter()
            .map(|entry| entry.candidate.id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["cand-c", "cand-b", "cand-a"]);
        assert!(body.candidates.iter().all(|entry| entry.breakdown.is_some()));
    }

    #[tokio::test]
    async fn rankings_endpoint_rejects_bad_csv() {
        let mut request = ranking_request(RankingRequestOptions::default());
        request.candidates_csv = Some(
            "ID,Name,Skills,Experience,Education,Availability,Applied At\ncand-c,Chandra,,,,,last week\n"
                .to_string(),
        );

        let err = rankings_endpoint(Extension(test_state(true)), Json(request))
            .await
            .expect_err("bad timestamp rejected");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn insights_endpoint_reports_pool_health() {
        let request = InsightsRequest {
            job: job(),
            candidates: pool(),
            candidates_csv: None,
            weights: None,
            now: Some(now()),
        };

        let Json(report) = insights_endpoint(Extension(test_state(true)), Json(request))
            .await
            .expect("insights succeed");

        assert_eq!(report.total_candidates, 2);
        assert_eq!(report.average_score, 61.5);
        assert_eq!(report.top_candidates.len(), 1);
        assert_eq!(report.top_candidates[0].priority_score, 84);
        assert!(report.skill_gaps.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.score_distribution.good, 1);
        assert_eq!(report.score_distribution.poor, 1);
    }

    #[tokio::test]
    async fn insights_endpoint_flags_weak_pool() {
        let request = InsightsRequest {
            job: job(),
            candidates: pool(),
            candidates_csv: None,
            weights: Some(ScoringWeights {
                skill: 0.0,
                experience: 0.0,
                education: 0.2,
                availability: 0.0,
                recency: 0.0,
            }),
            now: Some(now()),
        };

        let Json(report) = insights_endpoint(Extension(test_state(true)), Json(request))
            .await
            .expect("insights succeed");

        assert_eq!(report.average_score, 6.0);
        let severities: Vec<_> = report
            .recommendations
            .iter()
            .map(|rec| rec.severity)
            .collect();
        assert_eq!(
            severities,
            vec![RecommendationSeverity::Warning, RecommendationSeverity::Warning]
        );
    }

    #[tokio::test]
    async fn insights_endpoint_handles_empty_pool() {
        let request = InsightsRequest {
            job: job(),
            candidates: Vec::new(),
            candidates_csv: None,
            weights: None,
            now: None,
        };

        let Json(report) = insights_endpoint(Extension(test_state(true)), Json(request))
            .await
            .expect("insights succeed");

        assert_eq!(report.total_candidates, 0);
        assert_eq!(report.average_score, 0.0);
        assert!(report.recommendations.is_empty());
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = readiness_endpoint(Extension(test_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(test_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn router_serves_rankings_over_http() {
        let app = ranking_routes().layer(Extension(test_state(true)));
        let body = json!({
            "job": { "id": "job-cook", "title": "Line Cook", "tags": ["Cooking"] },
            "candidates": [
                { "id": "cand-a", "name": "Asha", "skills": ["Cooking"] },
                { "id": "cand-b", "name": "Bimal" }
            ],
            "options": { "sort_by": "skill_match" }
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/rankings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(value["sort_by"], "skill_match");
        assert_eq!(value["candidates"][0]["candidate"]["id"], "cand-a");
        assert_eq!(value["candidates"][1]["rank"], 2);
    }

    #[tokio::test]
    async fn router_exposes_health() {
        let app = ranking_routes().layer(Extension(test_state(true)));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
