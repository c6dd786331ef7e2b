pub mod animation;
pub mod cli;
pub mod config;
pub mod geometry;
pub mod projection;
pub mod rasterizer;
pub mod render;
pub mod shading;

/// Module for displaying frames in the terminal
pub mod tui;
