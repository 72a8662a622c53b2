//! Point-in-time view of the grid for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::engine::{
    BoxDisplay, EmployeeProvider, FocusState, FocusStateMachine, GridTemplate, PreferenceStore,
};
use crate::models::{Employee, Levels, Position};

/// One box as the presentation layer draws it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxView {
    pub position: Position,
    pub label: String,
    pub levels: Levels,
    pub display: BoxDisplay,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCss {
    pub columns: String,
    pub rows: String,
}

/// Everything needed to lay out and fill the nine boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub focus: FocusState,
    pub donut_mode: bool,
    pub template: GridTemplate,
    pub css: TemplateCss,
    /// Boxes in position order, 1 through 9.
    pub boxes: Vec<BoxView>,
}

impl GridSnapshot {
    pub fn capture<S: PreferenceStore>(
        provider: &dyn EmployeeProvider,
        focus: &FocusStateMachine<S>,
        donut_mode: bool,
        collapsed_strip: u16,
    ) -> Self {
        let template = GridTemplate::compute(focus.state(), collapsed_strip);
        let (columns, rows) = template.to_css();
        let mut by_position = provider.employees_by_position();

        let boxes = Position::ALL
            .iter()
            .map(|position| BoxView {
                position: *position,
                label: provider.short_label(*position),
                levels: position.levels(),
                display: focus.display_of(*position),
                employees: by_position.remove(position).unwrap_or_default(),
            })
            .collect();

        Self {
            focus: focus.state(),
            donut_mode,
            template,
            css: TemplateCss { columns, rows },
            boxes,
        }
    }

    pub fn get(&self, position: Position) -> Option<&BoxView> {
        self.boxes.iter().find(|b| b.position == position)
    }

    pub fn employee_count(&self) -> usize {
        self.boxes.iter().map(|b| b.employees.len()).sum()
    }
}
