use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use club_grouper::error::AppError;
use club_grouper::export::write_workbook;
use club_grouper::grouping::report::ReportRow;
use club_grouper::grouping::{DuplicateRecord, GroupingCheck, GroupingOutcome, TeamGrouper};
use club_grouper::import::TeamSheetImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

pub(crate) const EXPORT_FILENAME: &str = "grouped_output.csv";

#[derive(Debug, Deserialize)]
pub(crate) struct GroupTeamsRequest {
    /// CSV sheet text; must carry a `Name` column.
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GroupTeamsResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) groups: Vec<GroupView>,
    pub(crate) grouped_rows: Vec<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) duplicates: Option<DuplicateSection>,
    pub(crate) check: CheckView,
}

#[derive(Debug, Serialize)]
pub(crate) struct GroupView {
    pub(crate) key: String,
    pub(crate) team_count: usize,
    pub(crate) teams: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DuplicateSection {
    pub(crate) records: Vec<DuplicateRecord>,
    pub(crate) total_duplicates: usize,
    pub(crate) rows: Vec<ReportRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckView {
    #[serde(flatten)]
    pub(crate) totals: GroupingCheck,
    pub(crate) summary: String,
    pub(crate) balanced: bool,
}

impl GroupTeamsResponse {
    fn from_outcome(outcome: GroupingOutcome) -> Self {
        let check = outcome.check();
        let grouped_rows = outcome.grouped_rows();
        let duplicate_rows = outcome.duplicate_rows();
        let GroupingOutcome { groups, duplicates } = outcome;

        let duplicates = duplicate_rows.map(|rows| DuplicateSection {
            records: duplicates.records,
            total_duplicates: duplicates.total_duplicates,
            rows,
        });

        Self {
            generated_at: Utc::now(),
            groups: groups
                .into_iter()
                .map(|group| GroupView {
                    key: group.key(),
                    team_count: group.team_count(),
                    teams: group.members,
                })
                .collect(),
            grouped_rows,
            duplicates,
            check: CheckView {
                totals: check,
                summary: check.summary(),
                balanced: check.is_balanced(),
            },
        }
    }
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/teams/group", post(group_teams_endpoint))
        .route("/api/v1/teams/group/export", post(export_teams_endpoint))
        .layer(Extension(state))
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

fn group_sheet(state: &AppState, csv: String) -> Result<GroupingOutcome, AppError> {
    let names = TeamSheetImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let outcome = TeamGrouper::new(&state.rules).group(names);
    info!(
        groups = outcome.groups.len(),
        total_duplicates = outcome.duplicates.total_duplicates,
        "team sheet grouped"
    );
    Ok(outcome)
}

pub(crate) async fn group_teams_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<GroupTeamsRequest>,
) -> Result<Json<GroupTeamsResponse>, AppError> {
    let outcome = group_sheet(&state, payload.csv)?;
    Ok(Json(GroupTeamsResponse::from_outcome(outcome)))
}

/// Accepts a raw CSV body and answers with the report as a download.
pub(crate) async fn export_teams_endpoint(
    Extension(state): Extension<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let outcome = group_sheet(&state, body)?;

    let mut buffer = Vec::new();
    write_workbook(&mut buffer, &outcome)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        buffer,
    ))
}
