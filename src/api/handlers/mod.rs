use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::engine::{DonutModeFlag, DropOutcome, EmployeeProvider, FocusState, MoveOperation, MoveReport};
use crate::models::*;
use crate::snapshot::GridSnapshot;

// ============================================================
// Request / Response Types
// ============================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct DragStartInput {
    pub employee_id: EmployeeId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DragEndInput {
    /// Box under the pointer on release; `None` when released outside the grid.
    #[serde(default)]
    pub target: Option<Position>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DonutInput {
    pub active: bool,
}

/// A [`MoveReport`] with the failure flattened to its message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoveReportView {
    pub employee_id: EmployeeId,
    pub operation: MoveOperation,
    pub from: Position,
    pub target: Position,
    pub levels: Levels,
    pub error: Option<String>,
}

impl From<MoveReport> for MoveReportView {
    fn from(report: MoveReport) -> Self {
        Self {
            employee_id: report.employee_id,
            operation: report.operation,
            from: report.from,
            target: report.target,
            levels: report.levels,
            error: report.outcome.err().map(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DropResponse {
    pub outcome: String,
    pub report: Option<MoveReportView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PositionRow {
    pub position: Position,
    pub label: String,
    pub levels: Levels,
    pub row: usize,
    pub col: usize,
}

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Grid
// ============================================================

pub async fn get_grid(State(state): State<AppState>) -> Json<GridSnapshot> {
    let focus = state.focus();
    Json(GridSnapshot::capture(
        &state.roster,
        &*focus,
        state.roster.donut_mode_active(),
        state.collapsed_strip,
    ))
}

pub async fn list_positions() -> Json<Vec<PositionRow>> {
    let rows = Position::ALL
        .iter()
        .map(|p| {
            let rc = crate::engine::PositionMapper::row_col_of(*p);
            PositionRow {
                position: *p,
                label: p.short_label(),
                levels: p.levels(),
                row: rc.row,
                col: rc.col,
            }
        })
        .collect();
    Json(rows)
}

// ============================================================
// Focus
// ============================================================

pub async fn get_focus(State(state): State<AppState>) -> Json<FocusState> {
    Json(state.focus().state())
}

/// Anything that is not a position 1..=9 leaves the focus unchanged.
pub async fn expand_focus(
    State(state): State<AppState>,
    Path(position): Path<String>,
) -> Json<FocusState> {
    let mut focus = state.focus();
    match position.trim().parse::<i64>() {
        Ok(raw) => Json(focus.expand(raw)),
        Err(_) => {
            tracing::debug!(%position, "ignoring expand of non-numeric position");
            Json(focus.state())
        }
    }
}

pub async fn collapse_focus(State(state): State<AppState>) -> Json<FocusState> {
    Json(state.focus().collapse())
}

pub async fn escape_focus(State(state): State<AppState>) -> Json<FocusState> {
    let mut focus = state.focus();
    focus.on_escape();
    Json(focus.state())
}

// ============================================================
// Drag and drop
// ============================================================

pub async fn drag_start(
    State(state): State<AppState>,
    Json(input): Json<DragStartInput>,
) -> Result<StatusCode, (StatusCode, String)> {
    let employee = state
        .roster
        .get(input.employee_id)
        .ok_or_else(|| not_found("Employee"))?;

    let mut coordinator = state.coordinator();
    if coordinator.is_dragging() {
        return Err((StatusCode::CONFLICT, "A drag is already active".to_string()));
    }
    coordinator.on_drag_start(employee);
    Ok(StatusCode::NO_CONTENT)
}

/// Resolves the drop, then waits for the move. The coordinator is idle again
/// before the wait begins.
pub async fn drag_end(
    State(state): State<AppState>,
    Json(input): Json<DragEndInput>,
) -> Json<DropResponse> {
    let outcome = state.coordinator().on_drag_end(input.target);
    let label = outcome.as_str().to_string();

    let report = match outcome {
        DropOutcome::Dispatched(handle) => handle.wait().await.map(MoveReportView::from),
        _ => None,
    };

    Json(DropResponse {
        outcome: label,
        report,
    })
}

pub async fn drag_cancel(State(state): State<AppState>) -> StatusCode {
    state.coordinator().on_drag_cancel();
    StatusCode::NO_CONTENT
}

// ============================================================
// Donut mode
// ============================================================

pub async fn set_donut_mode(
    State(state): State<AppState>,
    Json(input): Json<DonutInput>,
) -> Json<DonutInput> {
    state.roster.set_donut_mode(input.active);
    Json(DonutInput {
        active: state.roster.donut_mode_active(),
    })
}

// ============================================================
// Employees
// ============================================================

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, (StatusCode, String)> {
    state
        .roster
        .get(EmployeeId(id))
        .map(Json)
        .ok_or_else(|| not_found("Employee"))
}

pub async fn select_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = EmployeeId(id);
    if state.roster.get(id).is_none() {
        return Err(not_found("Employee"));
    }
    state.roster.select_employee(id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<MoveRecord>> {
    Json(state.roster.history())
}
