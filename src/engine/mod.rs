//! Grid layout and interaction engine.
//!
//! - [`PositionMapper`]: position <-> level pair, labels and geometry
//! - [`FocusStateMachine`]: which box is expanded, remembered across sessions
//! - [`GridTemplate`]: row/column sizing derived from the focus
//! - [`DragDropCoordinator`]: drag gesture lifecycle and move dispatch
//! - [`DonutModeGate`]: permanent vs overlay move selection and visibility

mod coordinator;
mod donut;
mod error;
mod focus;
mod mapper;
mod preferences;
mod provider;
mod template;

pub use coordinator::*;
pub use donut::*;
pub use error::*;
pub use focus::*;
pub use mapper::*;
pub use preferences::*;
pub use provider::*;
pub use template::*;
