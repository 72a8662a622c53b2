//! Row and column sizing for the 3x3 grid under a given focus.

use serde::{Deserialize, Serialize};

use super::focus::FocusState;
use super::mapper::PositionMapper;
use crate::models::Position;

/// Default size in pixels of a collapsed strip.
pub const DEFAULT_COLLAPSED_STRIP: u16 = 60;

/// One track of the grid template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Track {
    /// Proportional share of whatever space the fixed tracks leave.
    Fraction(u16),
    /// Fixed size in pixels.
    Fixed(u16),
}

impl Track {
    fn css(&self) -> String {
        match self {
            Self::Fraction(weight) => format!("{weight}fr"),
            Self::Fixed(px) => format!("{px}px"),
        }
    }
}

/// Pixel rectangle of one box after resolving a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTemplate {
    pub columns: [Track; 3],
    pub rows: [Track; 3],
}

impl GridTemplate {
    /// Equal thirds, or one dominant row and column with the rest as strips.
    pub fn compute(focus: FocusState, collapsed_strip: u16) -> Self {
        match focus {
            FocusState::Normal => Self {
                columns: [Track::Fraction(1); 3],
                rows: [Track::Fraction(1); 3],
            },
            FocusState::Focused(position) => {
                let rc = PositionMapper::row_col_of(position);
                Self {
                    columns: focused_tracks(rc.col, collapsed_strip),
                    rows: focused_tracks(rc.row, collapsed_strip),
                }
            }
        }
    }

    /// `(grid-template-columns, grid-template-rows)` values.
    pub fn to_css(&self) -> (String, String) {
        (css_list(&self.columns), css_list(&self.rows))
    }

    /// Concrete column widths and row heights for a container of the given size.
    pub fn resolve(&self, width: u32, height: u32) -> ([u32; 3], [u32; 3]) {
        (resolve_tracks(&self.columns, width), resolve_tracks(&self.rows, height))
    }

    pub fn cell_rect(&self, position: Position, width: u32, height: u32) -> CellRect {
        let (columns, rows) = self.resolve(width, height);
        let rc = PositionMapper::row_col_of(position);
        CellRect {
            x: columns[..rc.col].iter().sum(),
            y: rows[..rc.row].iter().sum(),
            width: columns[rc.col],
            height: rows[rc.row],
        }
    }
}

fn focused_tracks(focused: usize, collapsed_strip: u16) -> [Track; 3] {
    let mut tracks = [Track::Fixed(collapsed_strip); 3];
    tracks[focused] = Track::Fraction(1);
    tracks
}

fn css_list(tracks: &[Track; 3]) -> String {
    tracks.iter().map(Track::css).collect::<Vec<_>>().join(" ")
}

fn resolve_tracks(tracks: &[Track; 3], available: u32) -> [u32; 3] {
    let fixed: u32 = tracks
        .iter()
        .map(|t| match t {
            Track::Fixed(px) => u32::from(*px),
            Track::Fraction(_) => 0,
        })
        .sum();
    let weights: u32 = tracks
        .iter()
        .map(|t| match t {
            Track::Fraction(w) => u32::from(*w),
            Track::Fixed(_) => 0,
        })
        .sum();
    let remaining = available.saturating_sub(fixed);

    let mut sizes = [0u32; 3];
    let mut handed_out = 0u32;
    let last_fraction = tracks
        .iter()
        .rposition(|t| matches!(t, Track::Fraction(_)));
    for (i, track) in tracks.iter().enumerate() {
        sizes[i] = match track {
            Track::Fixed(px) => u32::from(*px),
            // Last fractional track absorbs rounding so the sum fills the space.
            Track::Fraction(_) if Some(i) == last_fraction => remaining - handed_out,
            Track::Fraction(w) if weights > 0 => {
                let share = remaining * u32::from(*w) / weights;
                handed_out += share;
                share
            }
            Track::Fraction(_) => 0,
        };
    }
    sizes
}
