mod handlers;

pub use handlers::{DragEndInput, DragStartInput, DropResponse, DonutInput, MoveReportView};

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::engine::{DragDropCoordinator, FocusStateMachine, PreferenceStore};
use crate::roster::Roster;

/// Shared engine state behind the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    pub roster: Roster,
    pub focus: Arc<Mutex<FocusStateMachine>>,
    pub coordinator: Arc<Mutex<DragDropCoordinator>>,
    pub collapsed_strip: u16,
}

impl AppState {
    pub fn new(roster: Roster, preferences: Arc<dyn PreferenceStore>, collapsed_strip: u16) -> Self {
        let coordinator = DragDropCoordinator::new(Arc::new(roster.clone()), roster.gate());
        Self {
            focus: Arc::new(Mutex::new(FocusStateMachine::new(preferences))),
            coordinator: Arc::new(Mutex::new(coordinator)),
            roster,
            collapsed_strip,
        }
    }

    pub(crate) fn focus(&self) -> MutexGuard<'_, FocusStateMachine> {
        self.focus.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn coordinator(&self) -> MutexGuard<'_, DragDropCoordinator> {
        self.coordinator.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Grid
        .route("/grid", get(handlers::get_grid))
        .route("/positions", get(handlers::list_positions))
        // Focus
        .route("/focus", get(handlers::get_focus))
        .route("/focus", delete(handlers::collapse_focus))
        .route("/focus/escape", post(handlers::escape_focus))
        .route("/focus/{position}", post(handlers::expand_focus))
        // Drag and drop
        .route("/drag/start", post(handlers::drag_start))
        .route("/drag/end", post(handlers::drag_end))
        .route("/drag/cancel", post(handlers::drag_cancel))
        // Donut mode
        .route("/donut", put(handlers::set_donut_mode))
        // Employees
        .route("/employees/{id}", get(handlers::get_employee))
        .route("/employees/{id}/select", post(handlers::select_employee))
        .route("/history", get(handlers::get_history))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
