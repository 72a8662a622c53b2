//! ASCII rendering of a grid snapshot.

use crate::engine::BoxDisplay;
use crate::snapshot::{BoxView, GridSnapshot};

const CELL_WIDTH: usize = 22;
const EXPANDED: char = '*';
const COLLAPSED: char = '-';

/// Marker shown next to a box label.
fn display_symbol(display: BoxDisplay) -> char {
    match display {
        BoxDisplay::Normal => ' ',
        BoxDisplay::Expanded => EXPANDED,
        BoxDisplay::Collapsed => COLLAPSED,
    }
}

/// Render the nine boxes as three rows, high potential on top.
///
/// Example output:
/// ```text
/// +----------------------+----------------------+----------------------+
/// | 7 L,H                | 8 M,H                |*9 H,H                |
/// |   Grace Hopper       |                      |   Ada Lovelace       |
/// +----------------------+----------------------+----------------------+
/// ```
///
/// Collapsed boxes show only their headcount.
pub fn render_grid(snapshot: &GridSnapshot) -> String {
    let border = format!("+{}+\n", vec!["-".repeat(CELL_WIDTH); 3].join("+"));
    let mut output = String::new();
    output.push_str(&border);

    for top in [7u8, 4, 1] {
        let row: Vec<&BoxView> = (top..top + 3)
            .filter_map(|raw| snapshot.boxes.iter().find(|b| b.position.get() == raw))
            .collect();
        let lines = row.iter().map(|b| cell_lines(b)).collect::<Vec<_>>();
        let height = lines.iter().map(Vec::len).max().unwrap_or(1);

        for i in 0..height {
            output.push('|');
            for cell in &lines {
                let text = cell.get(i).map(String::as_str).unwrap_or("");
                output.push_str(&format!("{:<width$}|", text, width = CELL_WIDTH));
            }
            output.push('\n');
        }
        output.push_str(&border);
    }

    if snapshot.donut_mode {
        output.push_str("donut mode: showing the center box only\n");
    }
    output
}

fn cell_lines(view: &BoxView) -> Vec<String> {
    let mut lines = vec![format!(
        "{}{} {}",
        display_symbol(view.display),
        view.position,
        view.label
    )];
    if view.display == BoxDisplay::Collapsed {
        lines.push(format!("   ({})", view.employees.len()));
        return lines;
    }
    for employee in &view.employees {
        let marker = if employee.modified_in_session || employee.donut_modified {
            '~'
        } else {
            ' '
        };
        lines.push(truncate(&format!("  {}{}", marker, employee.name)));
    }
    lines
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= CELL_WIDTH {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(CELL_WIDTH - 1).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FocusStateMachine, MemoryPreferences};
    use crate::models::{Employee, EmployeeId, Position};
    use crate::roster::Roster;

    fn snapshot(expand: Option<i64>) -> GridSnapshot {
        let roster = Roster::new([
            Employee::new(EmployeeId(1), "Ada Lovelace", Position::new(9).unwrap()),
            Employee::new(EmployeeId(2), "Grace Hopper", Position::new(7).unwrap()),
        ]);
        let mut focus = FocusStateMachine::new(MemoryPreferences::new());
        if let Some(raw) = expand {
            focus.expand(raw);
        }
        GridSnapshot::capture(&roster, &focus, false, 60)
    }

    #[test]
    fn renders_high_potential_row_first() {
        let output = render_grid(&snapshot(None));
        let first_row = output.lines().nth(1).unwrap();
        assert!(first_row.contains(" 7 L,H"));
        assert!(first_row.contains(" 9 H,H"));
        assert!(output.lines().nth(2).unwrap().contains("Grace Hopper"));
    }

    #[test]
    fn collapsed_boxes_show_only_a_count() {
        let output = render_grid(&snapshot(Some(9)));
        assert!(output.contains("*9 H,H"));
        assert!(output.contains("-7 L,H"));
        assert!(output.contains("Ada Lovelace"));
        assert!(!output.contains("Grace Hopper"));
        assert!(output.contains("(1)"));
    }
}
