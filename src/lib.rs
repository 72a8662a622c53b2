//! Nine-box talent calibration engine.
//!
//! Employees sit in a 3x3 grid of performance x potential. This crate owns the
//! interaction logic over that grid: position/level mapping, expand/collapse
//! focus with remembered state, layout templates, and drag-and-drop moves in
//! both permanent and donut (what-if) modes.

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod render;
pub mod roster;
pub mod snapshot;
