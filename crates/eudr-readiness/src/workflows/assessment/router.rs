use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::domain::{AssessmentId, ExporterFormData};
use super::repository::{AlertPublisher, AssessmentSummaryView, RecordStore, StoreError};
use super::service::{AssessmentService, AssessmentServiceError};
use crate::workflows::dds::{DdsRequest, DueDiligenceStatement};

pub(crate) const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Router builder exposing scoring, history, portfolio, and DDS endpoints.
pub fn assessment_router<S, A>(service: Arc<AssessmentService<S, A>>) -> Router
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/score", post(score_handler::<S, A>))
        .route(
            "/api/v1/assessments",
            post(submit_handler::<S, A>).get(history_handler::<S, A>),
        )
        .route(
            "/api/v1/assessments/:assessment_id",
            get(record_handler::<S, A>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/dds",
            post(dds_handler::<S, A>),
        )
        .route(
            "/api/v1/portfolio/summary",
            get(portfolio_handler::<S, A>),
        )
        .route(
            "/api/v1/portfolio/export.csv",
            get(export_handler::<S, A>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn score_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    axum::Json(form): axum::Json<ExporterFormData>,
) -> Response
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    let result = service.preview(&form, Utc::now().date_naive());
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn submit_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    axum::Json(form): axum::Json<ExporterFormData>,
) -> Response
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    match service.submit(form) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    match service.history(limit) {
        Ok(records) => {
            let views: Vec<AssessmentSummaryView> =
                records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    let Some(id) = parse_id(&assessment_id) else {
        return unknown_id_response(&assessment_id);
    };
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dds_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
    Path(assessment_id): Path<String>,
    axum::Json(request): axum::Json<DdsRequest>,
) -> Response
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    let Some(id) = parse_id(&assessment_id) else {
        return unknown_id_response(&assessment_id);
    };
    let record = match service.get(&id) {
        Ok(record) => record,
        Err(error) => return error_response(error),
    };

    match DueDiligenceStatement::draft(&record, &request, Utc::now()) {
        Ok(statement) => {
            let disposition = format!("attachment; filename=\"{}\"", statement.file_name());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/xml".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                statement.render_xml(),
            )
                .into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn portfolio_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
) -> Response
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    match service.portfolio_summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<S, A>(
    State(service): State<Arc<AssessmentService<S, A>>>,
) -> Response
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    let mut buffer = Vec::new();
    match service.export_history_csv(&mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"eudr_assessment_history.csv\"",
                ),
            ],
            buffer,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn parse_id(raw: &str) -> Option<AssessmentId> {
    Uuid::parse_str(raw.trim()).ok().map(AssessmentId)
}

fn unknown_id_response(raw: &str) -> Response {
    let payload = json!({
        "error": format!("assessment {raw} not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
