//! Command-line flags overriding the default configuration
use crate::config::{AnimationConfig, ConfigError, RenderConfig};
use clap::{Parser, ValueEnum};
use nalgebra::Vector3;
use std::time::Duration;
use tracing::{warn, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Raw lines and escape codes on stdout
    Ansi,
    /// Full-screen terminal UI, quit with q or Esc
    Tui,
}

/// Spinning ASCII cube. Runs the classic animation when no flags are given
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Canvas width in characters
    #[arg(long)]
    pub width: Option<usize>,
    /// Canvas height in characters
    #[arg(long)]
    pub height: Option<usize>,
    /// Size the canvas from the terminal, a fixed canvas larger than the terminal wraps
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub fit_terminal: bool,
    /// Half of the cube's edge length
    #[arg(long)]
    pub size: Option<f32>,
    /// Sample spacing along the horizontal face parameter
    #[arg(long)]
    pub step_u: Option<f32>,
    /// Sample spacing along the vertical face parameter
    #[arg(long)]
    pub step_v: Option<f32>,
    /// Distance from the eye to the projection plane
    #[arg(long)]
    pub distance: Option<f32>,
    /// Horizontal stretch for non-square character cells
    #[arg(long)]
    pub aspect: Option<f32>,
    #[arg(long, allow_negative_numbers = true)]
    pub ambient: Option<f32>,
    #[arg(long)]
    pub contrast: Option<f32>,
    /// Brightness above which glyphs are drawn bold
    #[arg(long, allow_negative_numbers = true)]
    pub highlight: Option<f32>,
    /// Direction towards the light
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub light: Option<Vec<f32>>,
    /// Glyphs from darkest to brightest
    #[arg(long)]
    pub palette: Option<String>,
    /// Rotation per frame about x, y and z in radians
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub delta: Option<Vec<f32>>,
    /// Pause after each frame
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,
    #[arg(long, value_enum, default_value_t = Backend::Ansi)]
    pub backend: Backend,
    /// Never draw bright glyphs in bold
    #[arg(long)]
    pub no_bold: bool,
    /// Maximum level of log messages written to stderr
    #[arg(long, default_value_t = Level::WARN)]
    pub log_level: Level,
}

fn to_vector(values: &[f32]) -> Vector3<f32> {
    Vector3::new(values[0], values[1], values[2])
}

impl Args {
    /// Build the render configuration, given the terminal size as `(columns, rows)` if it is known
    pub fn render_config(
        &self,
        terminal_size: Option<(u16, u16)>,
    ) -> Result<RenderConfig, ConfigError> {
        let defaults = RenderConfig::default();
        let mut config = RenderConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            half_extent: self.size.unwrap_or(defaults.half_extent),
            step_u: self.step_u.unwrap_or(defaults.step_u),
            step_v: self.step_v.unwrap_or(defaults.step_v),
            distance: self.distance.unwrap_or(defaults.distance),
            aspect: self.aspect.unwrap_or(defaults.aspect),
            light: self.light.as_deref().map(to_vector).unwrap_or(defaults.light),
            ambient: self.ambient.unwrap_or(defaults.ambient),
            contrast: self.contrast.unwrap_or(defaults.contrast),
            highlight_threshold: self.highlight.unwrap_or(defaults.highlight_threshold),
            palette: self
                .palette
                .as_ref()
                .map(|p| p.chars().collect())
                .unwrap_or(defaults.palette),
            ..defaults
        };
        match terminal_size {
            // One row is left free for the newline after the last row
            Some((columns, rows)) if self.fit_terminal => {
                config = config.with_size(columns as usize, (rows as usize).saturating_sub(1));
            }
            Some((columns, rows)) => {
                if config.width > columns as usize || config.height > rows as usize {
                    warn!(
                        columns,
                        rows,
                        width = config.width,
                        height = config.height,
                        "Canvas is larger than the terminal, output will wrap"
                    );
                }
            }
            None if self.fit_terminal => {
                warn!("Terminal size unknown, keeping the fixed canvas size");
            }
            None => {}
        }
        config.validate()?;
        Ok(config)
    }

    pub fn animation_config(&self) -> Result<AnimationConfig, ConfigError> {
        let defaults = AnimationConfig::default();
        let config = AnimationConfig {
            delta: self.delta.as_deref().map(to_vector).unwrap_or(defaults.delta),
            interval: self
                .interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            max_frames: self.frames,
        };
        config.validate()?;
        Ok(config)
    }
}
