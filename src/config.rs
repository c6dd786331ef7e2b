//! Values controlling how the cube is rendered and animated
use crate::rasterizer::RasterizerError;
use nalgebra::Vector3;
use std::time::Duration;
use thiserror::Error;

/// Glyphs ordered from darkest to brightest
pub const DEFAULT_PALETTE: &str = ".':*?#&%@$";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Canvas must be at least one cell wide and one cell tall, got {width}x{height}.")]
    EmptyCanvas { width: usize, height: usize },
    #[error("Cube half extent must be positive and finite, got {0}.")]
    NonPositiveExtent(f32),
    #[error("Sample steps must be positive and finite, got ({step_u}, {step_v}).")]
    NonPositiveStep { step_u: f32, step_v: f32 },
    #[error("Projection distance must be positive and finite, got {0}.")]
    NonPositiveDistance(f32),
    #[error("Aspect correction must be positive and finite, got {0}.")]
    NonPositiveAspect(f32),
    #[error("Palette must contain at least one glyph.")]
    EmptyPalette,
    #[error("Light direction must be finite and have non-zero length.")]
    InvalidLight,
    #[error("Ambient term must lie in [0, 1], got {0}.")]
    AmbientOutOfRange(f32),
    #[error("Contrast exponent must be positive and finite, got {0}.")]
    NonPositiveContrast(f32),
    #[error("Rotation deltas must be finite.")]
    NonFiniteDelta,
    #[error(transparent)]
    Rasterizer(#[from] RasterizerError),
}

/// Infinity and NaN both fail
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Everything needed to turn rotation angles into one grid of characters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Number of character columns
    pub width: usize,
    /// Number of character rows
    pub height: usize,
    /// Half of the cube's edge length
    pub half_extent: f32,
    /// Sample spacing along the first face parameter
    pub step_u: f32,
    /// Sample spacing along the second face parameter.
    /// Coarser than `step_u` because terminal cells are taller than they are wide
    pub step_v: f32,
    /// Distance from the eye to the projection plane
    pub distance: f32,
    /// Horizontal stretch compensating for the height-to-width ratio of a cell
    pub aspect: f32,
    /// Direction towards the light. Normalized on use
    pub light: Vector3<f32>,
    /// Direction the viewer looks along
    pub view: Vector3<f32>,
    pub ambient: f32,
    pub contrast: f32,
    /// Brightness strictly above this is highlighted
    pub highlight_threshold: f32,
    pub palette: Vec<char>,
    pub background: char,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !positive(self.half_extent) {
            return Err(ConfigError::NonPositiveExtent(self.half_extent));
        }
        if !(positive(self.step_u) && positive(self.step_v)) {
            return Err(ConfigError::NonPositiveStep {
                step_u: self.step_u,
                step_v: self.step_v,
            });
        }
        if !positive(self.distance) {
            return Err(ConfigError::NonPositiveDistance(self.distance));
        }
        if !positive(self.aspect) {
            return Err(ConfigError::NonPositiveAspect(self.aspect));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !self.light.iter().all(|c| c.is_finite()) || self.light.norm() <= f32::EPSILON {
            return Err(ConfigError::InvalidLight);
        }
        if !(0.0..=1.0).contains(&self.ambient) {
            return Err(ConfigError::AmbientOutOfRange(self.ambient));
        }
        if !positive(self.contrast) {
            return Err(ConfigError::NonPositiveContrast(self.contrast));
        }
        Ok(())
    }

    /// Change the canvas size, leaving everything else untouched
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            half_extent: 7.0,
            step_u: 0.2,
            step_v: 0.4,
            distance: 30.0,
            aspect: 2.0,
            light: Vector3::new(0.5, -0.7, -0.8),
            view: Vector3::new(0.0, 0.0, -1.0),
            ambient: 0.05,
            contrast: 1.5,
            highlight_threshold: 0.75,
            palette: DEFAULT_PALETTE.chars().collect(),
            background: ' ',
        }
    }
}

/// How the rotation evolves between frames
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Angles in radians added about x, y and z after every frame
    pub delta: Vector3<f32>,
    /// Fixed pause after each frame, not corrected for render time
    pub interval: Duration,
    /// Stop after this many frames. Runs until interrupted when `None`
    pub max_frames: Option<u64>,
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delta.iter().all(|d| d.is_finite()) {
            return Err(ConfigError::NonFiniteDelta);
        }
        Ok(())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delta: Vector3::new(0.04, 0.06, 0.02),
            interval: Duration::from_millis(30),
            max_frames: None,
        }
    }
}
