use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use property_eval::error::AppError;
use property_eval::evaluation::{
    evaluate, parse_unit_mix, EvaluationReport, EvaluationResult, ProjectForm, ProjectInputs,
    UnitMixParse,
};
use property_eval::market::{LookupOutcome, LookupRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluationRequest {
    #[serde(flatten)]
    pub(crate) form: ProjectForm,
    #[serde(default)]
    pub(crate) fetch_income: bool,
    #[serde(default)]
    pub(crate) fetch_rent: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationResponse {
    pub(crate) evaluated_at: DateTime<Utc>,
    pub(crate) inputs: ProjectInputs,
    pub(crate) result: EvaluationResult,
    pub(crate) report: EvaluationReport,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IncomeRequest {
    pub(crate) state_fips: String,
    pub(crate) county_fips: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RentRequest {
    #[serde(default)]
    pub(crate) address: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnitMixRequest {
    pub(crate) text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LookupResponse {
    pub(crate) label: &'static str,
    pub(crate) display: String,
    pub(crate) message: String,
    #[serde(flatten)]
    pub(crate) outcome: LookupOutcome,
}

impl LookupResponse {
    fn new(label: &'static str, outcome: LookupOutcome) -> Self {
        let display = outcome.display_value();
        let message = match outcome.notice() {
            Some(notice) => notice.to_string(),
            None => format!("{label}: {display}"),
        };
        Self {
            label,
            display,
            message,
            outcome,
        }
    }
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/evaluations", post(evaluation_endpoint))
        .route("/api/v1/market/income", post(income_endpoint))
        .route("/api/v1/market/rent", post(rent_endpoint))
        .route("/api/v1/unit-mix", post(unit_mix_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
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

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluation_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let EvaluationRequest {
        form,
        fetch_income,
        fetch_rent,
    } = payload;

    let inputs = ProjectInputs::try_from(form)?;
    let request = LookupRequest {
        median_income: fetch_income,
        rent_estimate: fetch_rent,
    };
    let market = state.gateway.enrich(&inputs.site, request).await;
    let inputs = inputs.with_market(market);

    let result = evaluate(&inputs);
    let report = EvaluationReport::new(&inputs, &result);
    info!(
        total_development_cost = result.total_development_cost,
        roi_percent = result.roi_percent,
        unit_types = result.unit_mix.len(),
        warnings = report.warnings.len(),
        "project evaluated"
    );

    Ok(Json(EvaluationResponse {
        evaluated_at: Utc::now(),
        inputs,
        result,
        report,
    }))
}

pub(crate) async fn income_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<IncomeRequest>,
) -> Json<LookupResponse> {
    let outcome = state
        .gateway
        .median_income(&payload.state_fips, &payload.county_fips)
        .await;
    Json(LookupResponse::new("Median Household Income", outcome))
}

pub(crate) async fn rent_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RentRequest>,
) -> Json<LookupResponse> {
    let outcome = state.gateway.rent_estimate(&payload.address);
    Json(LookupResponse::new("Zillow Rent Zestimate", outcome))
}

pub(crate) async fn unit_mix_endpoint(Json(payload): Json<UnitMixRequest>) -> Json<UnitMixParse> {
    Json(parse_unit_mix(&payload.text))
}
