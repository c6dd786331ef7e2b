//! Displaying rendered frames
pub mod sink;
pub mod ui;
