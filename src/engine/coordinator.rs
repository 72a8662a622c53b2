//! Drag-and-drop move lifecycle: start, resolve, commit, cancel.
//!
//! ```text
//! Idle --start--> Dragging(employee) --end/cancel--> Idle
//! ```
//!
//! A drop returns the coordinator to `Idle` before any move is issued, so the
//! next drag can start while the previous move is still in flight. Moves run on
//! the tokio runtime; their outcome is delivered as a [`MoveReport`] through the
//! returned [`MoveHandle`] and, when attached, the report channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::donut::{DonutModeGate, MoveOperation};
use super::error::MoveError;
use super::provider::EmployeeProvider;
use crate::models::{Employee, EmployeeId, Levels, Position};

/// The employee captured between drag-start and drag-end.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub active_employee: Employee,
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of a committed move, once the provider has answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub employee_id: EmployeeId,
    pub operation: MoveOperation,
    pub from: Position,
    pub target: Position,
    pub levels: Levels,
    pub outcome: Result<(), MoveError>,
}

impl MoveReport {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// An in-flight move. Awaiting it is optional; dropping it does not cancel the move.
#[derive(Debug)]
pub struct MoveHandle {
    pub employee_id: EmployeeId,
    pub target: Position,
    pub operation: MoveOperation,
    task: JoinHandle<MoveReport>,
}

impl MoveHandle {
    /// Wait for the provider. `None` only if the move task itself was torn down.
    pub async fn wait(self) -> Option<MoveReport> {
        match self.task.await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(employee_id = %self.employee_id, "move task did not finish: {}", e);
                None
            }
        }
    }
}

/// What a drop resolved to.
#[derive(Debug)]
pub enum DropOutcome {
    /// Drag-end arrived without an active drag.
    NotDragging,
    /// Dropped outside every box.
    NoTarget,
    /// Dropped back onto the employee's current box.
    Unchanged,
    Dispatched(MoveHandle),
}

impl DropOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotDragging => "not_dragging",
            Self::NoTarget => "no_target",
            Self::Unchanged => "unchanged",
            Self::Dispatched(_) => "dispatched",
        }
    }
}

pub struct DragDropCoordinator {
    state: DragState,
    provider: Arc<dyn EmployeeProvider>,
    gate: DonutModeGate,
    reports: Option<mpsc::UnboundedSender<MoveReport>>,
    mounted: Arc<AtomicBool>,
}

impl DragDropCoordinator {
    pub fn new(provider: Arc<dyn EmployeeProvider>, gate: DonutModeGate) -> Self {
        Self {
            state: DragState::Idle,
            provider,
            gate,
            reports: None,
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Attach a channel that receives a report for every committed move.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<MoveReport> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.reports = Some(tx);
        rx
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_employee(&self) -> Option<&Employee> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(&session.active_employee),
        }
    }

    pub fn gate(&self) -> &DonutModeGate {
        &self.gate
    }

    /// Capture `employee` for the gesture. Only one pointer drags at a time.
    pub fn on_drag_start(&mut self, employee: Employee) {
        debug_assert!(!self.is_dragging(), "drag started while another is active");
        debug!(employee_id = %employee.employee_id, "drag started");
        self.state = DragState::Dragging(DragSession {
            active_employee: employee,
        });
    }

    pub fn on_drag_cancel(&mut self) {
        if let DragState::Dragging(session) = std::mem::take(&mut self.state) {
            debug!(employee_id = %session.active_employee.employee_id, "drag cancelled");
        }
    }

    /// Finish the gesture over `target` (or over nothing).
    ///
    /// Must be called from within a tokio runtime: a committed move is spawned
    /// onto it.
    pub fn on_drag_end(&mut self, target: Option<Position>) -> DropOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DropOutcome::NotDragging;
        };
        let employee = session.active_employee;

        let Some(target) = target else {
            debug!(employee_id = %employee.employee_id, "dropped outside the grid");
            return DropOutcome::NoTarget;
        };

        let from = self.gate.current_position(&employee);
        if from == target {
            debug!(employee_id = %employee.employee_id, %target, "dropped on current box");
            return DropOutcome::Unchanged;
        }

        let operation = self.gate.select_move_operation();
        let handle = self.dispatch(employee.employee_id, from, target, operation);
        DropOutcome::Dispatched(handle)
    }

    fn dispatch(
        &self,
        employee_id: EmployeeId,
        from: Position,
        target: Position,
        operation: MoveOperation,
    ) -> MoveHandle {
        let levels = target.levels();
        let provider = Arc::clone(&self.provider);
        let reports = self.reports.clone();
        let mounted = Arc::clone(&self.mounted);

        let task = tokio::spawn(async move {
            let outcome = match operation {
                MoveOperation::Permanent => {
                    provider
                        .move_permanent(employee_id, levels.performance, levels.potential)
                        .await
                }
                MoveOperation::Overlay => {
                    provider
                        .move_overlay(employee_id, levels.performance, levels.potential)
                        .await
                }
            };

            match &outcome {
                Ok(()) => info!(
                    %employee_id,
                    %from,
                    %target,
                    operation = ?operation,
                    "move applied"
                ),
                Err(e) => error!(
                    %employee_id,
                    %target,
                    operation = ?operation,
                    "move failed: {}",
                    e
                ),
            }

            let report = MoveReport {
                employee_id,
                operation,
                from,
                target,
                levels,
                outcome,
            };
            if mounted.load(Ordering::SeqCst) {
                if let Some(tx) = reports {
                    let _ = tx.send(report.clone());
                }
            }
            report
        });

        MoveHandle {
            employee_id,
            target,
            operation,
            task,
        }
    }
}

impl Drop for DragDropCoordinator {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}
