//! # API REST
//!
//! REST API for the Remote Home Check scorer.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Scoring, storage and email live in `rhc-core`; handlers translate between HTTP and
//! [`AssessmentService`] and move its blocking work off the async runtime.

#![warn(rust_2018_idioms)]

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AssessReq, AssessRes, AssessmentSummary, ErrorRes, HealthRes, HealthService,
    ListAssessmentsRes, PatientReq, QuestionRes, ScoresRes, SmtpStatusRes,
};
use rhc_core::constants::PDF_CONTENT_TYPE;
use rhc_core::{AssessmentId, AssessmentService, CoreError, ProcessError, QuestionView, Scores};
use rhc_mail::SmtpStatus;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    service: AssessmentService,
}

impl AppState {
    pub fn new(service: AssessmentService) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        check_smtp,
        questions,
        assess,
        list_assessments,
        get_assessment,
        get_report,
    ),
    components(schemas(
        HealthRes,
        SmtpStatusRes,
        QuestionRes,
        AssessReq,
        PatientReq,
        ScoresRes,
        AssessRes,
        ErrorRes,
        AssessmentSummary,
        ListAssessmentsRes,
    ))
)]
struct ApiDoc;

/// Builds the application router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/check-smtp", get(check_smtp))
        .route("/questions", get(questions))
        .route("/assess", post(assess))
        .route("/assessments", get(list_assessments))
        .route("/assessments/:id", get(get_assessment))
        .route("/assessments/:id/report", get(get_report))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the router until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("++ Starting Remote Home Check REST on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness endpoint for monitoring and load balancer health checks.
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/check-smtp",
    responses(
        (status = 200, description = "SMTP configuration status", body = SmtpStatusRes)
    )
)]
/// Reports which SMTP settings the server started with, without revealing the password.
async fn check_smtp(State(state): State<AppState>) -> Json<SmtpStatusRes> {
    Json(smtp_status_res(state.service.smtp_status()))
}

#[utoipa::path(
    get,
    path = "/questions",
    responses(
        (status = 200, description = "Question catalogue in display order", body = [QuestionRes])
    )
)]
async fn questions(State(state): State<AppState>) -> Json<Vec<QuestionRes>> {
    Json(
        state
            .service
            .questions()
            .into_iter()
            .map(question_res)
            .collect(),
    )
}

#[utoipa::path(
    post,
    path = "/assess",
    request_body = AssessReq,
    responses(
        (status = 200, description = "Assessment scored, stored and emailed", body = AssessRes),
        (status = 400, description = "Missing body, invalid assessment or outputs not stored", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Scores an assessment, stores its JSON, CSV and PDF outputs, and emails the patient.
///
/// # Arguments
/// * `body` - Raw request body, expected to be an assessment JSON document
///
/// # Returns
/// * `Ok(Json<AssessRes>)` - Assessment id, scores and whether the email was sent
/// * `Err((StatusCode, Json<ErrorRes>))` - Error body as listed below
///
/// The body is parsed here rather than with the `Json` extractor so that a missing or
/// malformed body gets the same error as an empty one.
///
/// # Errors
/// - `400` with `"No JSON data provided"` for an empty or non-JSON body, or a falsy JSON value
///   (`null`, `false`, `0`, `""`, `[]`, `{}`).
/// - `400` with `"Invalid assessment data"` and every validation message in `details`.
/// - `400` with `"Processing failed"` if an output file cannot be written.
/// - `500` with `"Internal server error"` if the processing task itself fails.
async fn assess(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AssessRes>, ApiError> {
    let data = match serde_json::from_slice::<Value>(&body) {
        Ok(data) if !is_empty_payload(&data) => data,
        _ => {
            return Err(error(
                StatusCode::BAD_REQUEST,
                ErrorRes::new("No JSON data provided"),
            ))
        }
    };

    let service = state.service.clone();
    let result = run_blocking(move || service.process(&data)).await?;

    match result {
        Ok(outcome) => Ok(Json(AssessRes {
            success: true,
            assessment_id: outcome.assessment_id.to_string(),
            scores: scores_res(&outcome.scores),
            email_sent: outcome.email_sent,
        })),
        Err(ProcessError::Invalid(messages)) => {
            tracing::info!("rejected assessment: {}", messages.join("; "));
            Err(error(
                StatusCode::BAD_REQUEST,
                ErrorRes::with_details("Invalid assessment data", messages),
            ))
        }
        Err(ProcessError::Failed(e)) => {
            tracing::error!("Process assessment error: {:?}", e);
            Err(error(
                StatusCode::BAD_REQUEST,
                ErrorRes::with_details("Processing failed", e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/assessments",
    responses(
        (status = 200, description = "Stored assessments", body = ListAssessmentsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List stored assessments
///
/// # Returns
/// * `Ok(Json<ListAssessmentsRes>)` - Stored ids in sorted order, each flagged with whether a PDF exists
/// * `Err((StatusCode, Json<ErrorRes>))` - `500` if the assessments directory cannot be read
async fn list_assessments(
    State(state): State<AppState>,
) -> Result<Json<ListAssessmentsRes>, ApiError> {
    let service = state.service.clone();
    let assessments = run_blocking(move || {
        service.list_assessments().map(|ids| {
            ids.into_iter()
                .map(|id| AssessmentSummary {
                    has_report: service.store().report_path(&id).is_file(),
                    assessment_id: id.to_string(),
                })
                .collect::<Vec<_>>()
        })
    })
    .await?
    .map_err(core_error)?;

    Ok(Json(ListAssessmentsRes { assessments }))
}

#[utoipa::path(
    get,
    path = "/assessments/{id}",
    params(("id" = String, Path, description = "Assessment id")),
    responses(
        (status = 200, description = "Stored assessment document with scores"),
        (status = 400, description = "Malformed assessment id", body = ErrorRes),
        (status = 404, description = "Assessment not found", body = ErrorRes)
    )
)]
/// Read a stored assessment document
///
/// # Arguments
/// * `id` - Canonical assessment id from the `POST /assess` response
///
/// # Returns
/// * `Ok(Json<Value>)` - The submission as stored, with `assessment_id`, `scores` and `processed_at`
/// * `Err((StatusCode, Json<ErrorRes>))` - `400` for a malformed id, `404` if nothing is stored
async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let service = state.service.clone();
    let document = run_blocking(move || service.load_assessment(&id))
        .await?
        .map_err(core_error)?;
    Ok(Json(document))
}

#[utoipa::path(
    get,
    path = "/assessments/{id}/report",
    params(("id" = String, Path, description = "Assessment id")),
    responses(
        (status = 200, description = "PDF report"),
        (status = 400, description = "Malformed assessment id", body = ErrorRes),
        (status = 404, description = "Report not found", body = ErrorRes)
    )
)]
/// Download the PDF report of a stored assessment, served inline as `<id>.pdf`.
async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let service = state.service.clone();
    let bytes = run_blocking(move || service.load_report(&id))
        .await?
        .map_err(core_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}.pdf\"", id),
            ),
        ],
        bytes,
    )
        .into_response())
}

fn error(status: StatusCode, body: ErrorRes) -> ApiError {
    (status, Json(body))
}

/// Runs blocking service work on the blocking pool. A panicking task becomes a `500`.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorRes::with_details("Internal server error", e.to_string()),
        )
    })
}

/// Falsy JSON values, all treated as "nothing sent".
fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Bool(true) => false,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
    }
}

fn parse_id(raw: &str) -> Result<AssessmentId, ApiError> {
    AssessmentId::parse(raw).map_err(|e| {
        error(
            StatusCode::BAD_REQUEST,
            ErrorRes::with_details("Invalid assessment id", e.to_string()),
        )
    })
}

fn core_error(e: CoreError) -> ApiError {
    match e {
        CoreError::NotFound(what) => error(
            StatusCode::NOT_FOUND,
            ErrorRes::with_details("Not found", what),
        ),
        other => {
            tracing::error!("Storage error: {:?}", other);
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorRes::with_details("Internal server error", other.to_string()),
            )
        }
    }
}

fn question_res(view: QuestionView) -> QuestionRes {
    QuestionRes {
        name: view.name,
        label: view.label,
        options: view.options,
    }
}

fn scores_res(scores: &Scores) -> ScoresRes {
    ScoresRes {
        physical_score: scores.physical_score,
        mental_score: scores.mental_score,
        insight_score: scores.insight_score,
        tier: scores.tier.to_string(),
        physical_delta: scores.physical_delta,
        mental_delta: scores.mental_delta,
    }
}

fn smtp_status_res(status: SmtpStatus) -> SmtpStatusRes {
    SmtpStatusRes {
        smtp_configured: status.smtp_configured,
        smtp_server: status.smtp_server,
        smtp_port: status.smtp_port,
        smtp_username: status.smtp_username,
        smtp_password_set: status.smtp_password_set,
    }
}
