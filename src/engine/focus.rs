//! Expand/collapse focus over the nine boxes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::preferences::{PreferenceStore, EXPANDED_POSITION_KEY};
use crate::models::Position;

/// Which box, if any, is expanded. At most one can be by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "position", rename_all = "snake_case")]
pub enum FocusState {
    /// All nine boxes share the grid equally.
    #[default]
    Normal,
    /// One box is enlarged and the other eight collapse to strips.
    Focused(Position),
}

impl FocusState {
    pub fn expanded_position(&self) -> Option<Position> {
        match self {
            Self::Normal => None,
            Self::Focused(position) => Some(*position),
        }
    }
}

/// How a single box should render under the current focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxDisplay {
    Normal,
    Expanded,
    Collapsed,
}

impl BoxDisplay {
    /// Resolve a pair of independent flags as handed over by older callers.
    /// Both set is contradictory; expanded wins.
    pub fn from_flags(expanded: bool, collapsed: bool) -> Self {
        match (expanded, collapsed) {
            (true, true) => {
                warn!("box flagged both expanded and collapsed, treating as expanded");
                Self::Expanded
            }
            (true, false) => Self::Expanded,
            (false, true) => Self::Collapsed,
            (false, false) => Self::Normal,
        }
    }
}

/// Owns the focus state and mirrors every transition into the preference store.
pub struct FocusStateMachine<S: PreferenceStore = Arc<dyn PreferenceStore>> {
    state: FocusState,
    store: S,
}

impl<S: PreferenceStore> FocusStateMachine<S> {
    /// Restore the last expanded box from `store`.
    ///
    /// Missing, unreadable, malformed or out-of-range values all start in
    /// [`FocusState::Normal`].
    pub fn new(store: S) -> Self {
        let state = match store.get(EXPANDED_POSITION_KEY) {
            Ok(Some(raw)) => match raw.parse::<Position>() {
                Ok(position) => FocusState::Focused(position),
                Err(e) => {
                    warn!(value = %raw, "ignoring persisted focus: {}", e);
                    FocusState::Normal
                }
            },
            Ok(None) => FocusState::Normal,
            Err(e) => {
                warn!("could not read persisted focus: {}", e);
                FocusState::Normal
            }
        };
        debug!(?state, "focus restored");
        Self { state, store }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn expanded_position(&self) -> Option<Position> {
        self.state.expanded_position()
    }

    /// Expand the box numbered `raw`. Anything outside 1..=9 is ignored.
    pub fn expand(&mut self, raw: i64) -> FocusState {
        match Position::new(raw) {
            Some(position) => self.expand_position(position),
            None => {
                debug!(raw, "ignoring expand of invalid position");
                self.state
            }
        }
    }

    pub fn expand_position(&mut self, position: Position) -> FocusState {
        self.state = FocusState::Focused(position);
        debug!(%position, "box expanded");
        self.persist();
        self.state
    }

    pub fn collapse(&mut self) -> FocusState {
        self.state = FocusState::Normal;
        debug!("focus collapsed");
        self.persist();
        self.state
    }

    /// Escape collapses a focused grid. Returns whether anything changed.
    pub fn on_escape(&mut self) -> bool {
        match self.state {
            FocusState::Normal => false,
            FocusState::Focused(_) => {
                self.collapse();
                true
            }
        }
    }

    /// Expand `position`, or collapse if it is already the expanded box.
    pub fn toggle(&mut self, position: Position) -> FocusState {
        if self.state == FocusState::Focused(position) {
            self.collapse()
        } else {
            self.expand_position(position)
        }
    }

    pub fn display_of(&self, position: Position) -> BoxDisplay {
        match self.state {
            FocusState::Normal => BoxDisplay::Normal,
            FocusState::Focused(p) if p == position => BoxDisplay::Expanded,
            FocusState::Focused(_) => BoxDisplay::Collapsed,
        }
    }

    fn persist(&self) {
        let result = match self.state {
            FocusState::Focused(position) => self
                .store
                .set(EXPANDED_POSITION_KEY, &position.to_string()),
            FocusState::Normal => self.store.clear(EXPANDED_POSITION_KEY),
        };
        if let Err(e) = result {
            warn!(state = ?self.state, "failed to persist focus: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::preferences::MemoryPreferences;

    fn pos(raw: i64) -> Position {
        Position::new(raw).unwrap()
    }

    #[test]
    fn expand_is_idempotent_and_persisted() {
        let store = MemoryPreferences::new();
        let mut focus = FocusStateMachine::new(store.clone());

        assert_eq!(focus.expand(5), FocusState::Focused(pos(5)));
        assert_eq!(focus.expand(5), FocusState::Focused(pos(5)));
        assert_eq!(
            store.get(EXPANDED_POSITION_KEY).unwrap(),
            Some("5".to_string())
        );
    }

    #[test]
    fn collapse_clears_the_persisted_key() {
        let store = MemoryPreferences::new();
        let mut focus = FocusStateMachine::new(store.clone());
        focus.expand(5);

        assert_eq!(focus.collapse(), FocusState::Normal);
        assert_eq!(store.get(EXPANDED_POSITION_KEY).unwrap(), None);
    }

    #[test]
    fn invalid_expand_is_a_no_op() {
        let store = MemoryPreferences::new();
        let mut focus = FocusStateMachine::new(store.clone());
        focus.expand(3);

        assert_eq!(focus.expand(0), FocusState::Focused(pos(3)));
        assert_eq!(focus.expand(10), FocusState::Focused(pos(3)));
        assert_eq!(
            store.get(EXPANDED_POSITION_KEY).unwrap(),
            Some("3".to_string())
        );
    }

    #[test]
    fn restores_valid_persisted_focus() {
        let store = MemoryPreferences::with_value(EXPANDED_POSITION_KEY, "8");
        let focus = FocusStateMachine::new(store);
        assert_eq!(focus.state(), FocusState::Focused(pos(8)));
    }

    #[test]
    fn corrupt_persisted_focus_starts_normal() {
        for raw in ["0", "10", "abc", "", "-1"] {
            let store = MemoryPreferences::with_value(EXPANDED_POSITION_KEY, raw);
            let focus = FocusStateMachine::new(store);
            assert_eq!(focus.state(), FocusState::Normal, "value {raw:?}");
        }
        let focus = FocusStateMachine::new(MemoryPreferences::new());
        assert_eq!(focus.state(), FocusState::Normal);
    }

    #[test]
    fn escape_only_acts_when_focused() {
        let store = MemoryPreferences::new();
        let mut focus = FocusStateMachine::new(store.clone());
        assert!(!focus.on_escape());

        focus.expand(2);
        assert!(focus.on_escape());
        assert_eq!(focus.state(), FocusState::Normal);
        assert_eq!(store.get(EXPANDED_POSITION_KEY).unwrap(), None);
    }

    #[test]
    fn toggle_flips_the_same_box() {
        let mut focus = FocusStateMachine::new(MemoryPreferences::new());
        assert_eq!(focus.toggle(pos(4)), FocusState::Focused(pos(4)));
        assert_eq!(focus.toggle(pos(6)), FocusState::Focused(pos(6)));
        assert_eq!(focus.toggle(pos(6)), FocusState::Normal);
    }

    #[test]
    fn other_boxes_collapse_around_the_focused_one() {
        let mut focus = FocusStateMachine::new(MemoryPreferences::new());
        assert_eq!(focus.display_of(pos(1)), BoxDisplay::Normal);

        focus.expand(9);
        assert_eq!(focus.display_of(pos(9)), BoxDisplay::Expanded);
        for raw in 1..=8 {
            assert_eq!(focus.display_of(pos(raw)), BoxDisplay::Collapsed);
        }
    }

    #[test]
    fn conflicting_flags_prefer_expanded() {
        assert_eq!(BoxDisplay::from_flags(true, true), BoxDisplay::Expanded);
        assert_eq!(BoxDisplay::from_flags(false, true), BoxDisplay::Collapsed);
        assert_eq!(BoxDisplay::from_flags(false, false), BoxDisplay::Normal);
    }
}
