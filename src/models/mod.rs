//! Domain models for the calibration grid.
//!
//! - [`Level`] / [`Levels`]: ratings on the performance and potential axes.
//! - [`Position`]: one of the nine boxes; the only persisted placement value.
//! - [`Employee`]: a person on the grid with permanent and overlay placements.
//! - [`MoveRecord`]: log entry for an applied move.

mod employee;
mod history;
mod level;
mod position;

pub use employee::*;
pub use history::*;
pub use level::*;
pub use position::*;
