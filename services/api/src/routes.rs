use crate::infra::{parse_date, AppState, DealRequest, ParsedDeal, PlanningState};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use dialogue::error::AppError;
use dialogue::planning::{PackTag, ScoredPack, ServicePack};
use dialogue::signals::PooledSignal;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PackListQuery {
    #[serde(default)]
    pub(crate) tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PackListResponse<'a> {
    pub(crate) count: usize,
    pub(crate) packs: Vec<&'a ServicePack>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse<'a> {
    pub(crate) config_version: &'a str,
    pub(crate) recommendations: Vec<ScoredPack<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) ignored: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SignalPoolQuery {
    #[serde(default)]
    pub(crate) week_of: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignalPoolResponse {
    pub(crate) focus_id: String,
    pub(crate) week_of: NaiveDate,
    pub(crate) signals: Vec<PooledSignal>,
}

/// Planning and signal endpoints plus the operational probes.
pub(crate) fn planning_router(state: PlanningState) -> Router {
    Router::new()
        .route("/api/v1/packs", get(pack_list_endpoint))
        .route("/api/v1/packs/config", get(scoring_config_endpoint))
        .route(
            "/api/v1/packs/recommendations",
            post(recommendations_endpoint),
        )
        .route(
            "/api/v1/packs/:pack_id/breakdown",
            post(pack_breakdown_endpoint),
        )
        .route("/api/v1/signals/:focus_id/pool", get(signal_pool_endpoint))
        .with_state(state)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

pub(crate) async fn pack_list_endpoint(
    State(state): State<PlanningState>,
    Query(query): Query<PackListQuery>,
) -> Result<Response, AppError> {
    let catalog = state.engine.catalog();
    let packs = match query.tag.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            let tag = PackTag::from_key(raw)
                .ok_or_else(|| AppError::InvalidInput(format!("unknown pack tag '{raw}'")))?;
            catalog.packs_with_tag(tag)
        }
        _ => catalog.packs().iter().collect(),
    };

    Ok(Json(PackListResponse {
        count: packs.len(),
        packs,
    })
    .into_response())
}

pub(crate) async fn scoring_config_endpoint(State(state): State<PlanningState>) -> Response {
    Json(state.engine.config()).into_response()
}

pub(crate) async fn recommendations_endpoint(
    State(state): State<PlanningState>,
    Json(request): Json<DealRequest>,
) -> Response {
    let ParsedDeal { context, ignored } = request.into_context();
    let engine = state.engine.as_ref();

    Json(RecommendationResponse {
        config_version: engine.config().version,
        recommendations: engine.score(&context),
        ignored,
    })
    .into_response()
}

pub(crate) async fn pack_breakdown_endpoint(
    State(state): State<PlanningState>,
    Path(pack_id): Path<String>,
    Json(request): Json<DealRequest>,
) -> Result<Response, AppError> {
    let ParsedDeal { context, .. } = request.into_context();
    let breakdown = state
        .engine
        .explain(&pack_id, &context)
        .ok_or_else(|| AppError::NotFound(format!("service pack '{pack_id}'")))?;

    Ok(Json(breakdown).into_response())
}

pub(crate) async fn signal_pool_endpoint(
    State(state): State<PlanningState>,
    Path(focus_id): Path<String>,
    Query(query): Query<SignalPoolQuery>,
) -> Result<Json<SignalPoolResponse>, AppError> {
    let raw = query
        .week_of
        .ok_or_else(|| AppError::InvalidInput("week_of query parameter is required".to_string()))?;
    let week_of = parse_date(&raw).map_err(AppError::InvalidInput)?;

    let signals = state.signals.build(&focus_id, week_of);
    Ok(Json(SignalPoolResponse {
        focus_id,
        week_of,
        signals,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        planning_router(PlanningState::standard().expect("seed engines load"))
    }

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    async fn read_json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request builds")
    }

    fn governance_rfp_request() -> Value {
        json!({
            "mode": "Security / Governance Review",
            "trigger": "RFP / Tender",
            "vendor_posture": "Microsoft-first",
            "partner_capabilities": {
                "Governance & Risk": "Strong",
                "Security & Identity": "Strong"
            }
        })
    }

    #[tokio::test]
    async fn recommendations_rank_gated_packs_with_explanations() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/packs/recommendations",
                governance_rfp_request(),
            ))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["config_version"], "pack-scoring-2026.02");
        assert!(body.get("ignored").is_none());

        let recommendations = body["recommendations"].as_array().expect("array");
        let ids: Vec<&str> = recommendations
            .iter()
            .filter_map(|entry| entry["pack"]["id"].as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "ai-governance-quickstart",
                "zero-trust-identity-hardening",
                "ai-readiness-assessment"
            ]
        );
        assert_eq!(recommendations[0]["rank"], 1);
        assert_eq!(recommendations[0]["score"], 24);
        assert_eq!(
            recommendations[0]["explanations"][0],
            "Strong Governance & Risk capability"
        );
    }

    #[tokio::test]
    async fn recommendations_match_capability_names_ignoring_case() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/packs/recommendations",
                json!({
                    "mode": "Security / Governance Review",
                    "partner_capabilities": { "security & identity": "Strong" }
                }),
            ))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        let ids: Vec<&str> = body["recommendations"]
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|entry| entry["pack"]["id"].as_str())
            .collect();
        assert!(ids.contains(&"zero-trust-identity-hardening"));
    }

    #[tokio::test]
    async fn recommendations_report_ignored_labels() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/packs/recommendations",
                json!({ "mode": "Brainstorm", "partner_capabilities": { "Modern Work": "expert" } }),
            ))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(
            body["ignored"],
            json!(["mode: Brainstorm", "capability Modern Work: expert"])
        );
    }

    #[tokio::test]
    async fn breakdown_shows_capability_exclusion() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/packs/ai-governance-quickstart/breakdown",
                json!({ "mode": "Security / Governance Review" }),
            ))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["meets_threshold"], false);
        assert!(body.get("score").is_none());
        assert_eq!(body["excluded_by"]["capability"], "Governance & Risk");
    }

    #[tokio::test]
    async fn breakdown_for_unknown_pack_is_not_found() {
        let response = router()
            .oneshot(post_json("/api/v1/packs/unknown-pack/breakdown", json!({})))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn pack_listing_filters_by_tag() {
        let response = router()
            .oneshot(get_request("/api/v1/packs?tag=security_identity"))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["packs"][0]["id"], "ai-governance-quickstart");
        assert_eq!(body["packs"][1]["id"], "zero-trust-identity-hardening");

        let all = read_json_body(
            router()
                .oneshot(get_request("/api/v1/packs"))
                .await
                .expect("request handled"),
        )
        .await;
        assert_eq!(all["count"], 10);
    }

    #[tokio::test]
    async fn pack_listing_rejects_unknown_tag() {
        let response = router()
            .oneshot(get_request("/api/v1/packs?tag=blockchain"))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn scoring_config_is_exposed() {
        let response = router()
            .oneshot(get_request("/api/v1/packs/config"))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["version"], "pack-scoring-2026.02");
        assert_eq!(body["max_packs_to_recommend"], 3);
        assert_eq!(body["capability_points"]["none"], -10);
    }

    #[tokio::test]
    async fn signal_pool_merges_sources_for_week() {
        let response = router()
            .oneshot(get_request("/api/v1/signals/schindler/pool?week_of=2026-02-10"))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["focus_id"], "schindler");
        assert_eq!(body["week_of"], "2026-02-10");
        let signals = body["signals"].as_array().expect("array");
        assert_eq!(signals.len(), 6);
        assert_eq!(signals[0]["id"], "sig-sch-002");
        assert_eq!(signals[0]["origins"], json!(["Extractor", "Quick Brief"]));
    }

    #[tokio::test]
    async fn signal_pool_rejects_malformed_week() {
        for uri in [
            "/api/v1/signals/schindler/pool?week_of=02/10/2026",
            "/api/v1/signals/schindler/pool",
        ] {
            let response = router().oneshot(get_request(uri)).await.expect("request handled");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = router()
            .layer(Extension(app_state(false)))
            .oneshot(get_request("/ready"))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = router()
            .layer(Extension(app_state(true)))
            .oneshot(get_request("/ready"))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
