use crate::config::RenderConfig;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RasterizerError {
    #[error("Gradient must contain at least one glyph.")]
    EmptyGradient,
    #[error("Highlight threshold must be finite.")]
    InvalidThreshold,
}

/// A single character cell ready to be displayed
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ShadedCell {
    pub symbol: char,
    /// Rendered bold by sinks that support it
    pub highlighted: bool,
}

impl ShadedCell {
    pub fn plain(symbol: char) -> Self {
        Self {
            symbol,
            highlighted: false,
        }
    }
}

/// Row-major grid of shaded cells, top row first
#[derive(Debug, PartialEq, Clone)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<ShadedCell>,
}

impl CellGrid {
    pub fn new(width: usize, height: usize, cells: Vec<ShadedCell>) -> Self {
        assert!(width > 0, "Grid must be at least one cell wide");
        assert_eq!(cells.len(), width * height, "Grid cells must fill the grid");
        Self {
            width,
            height,
            cells,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn get(&self, column: usize, row: usize) -> Option<&ShadedCell> {
        if column < self.width && row < self.height {
            self.cells.get(row * self.width + column)
        } else {
            None
        }
    }
    pub fn rows(&self) -> impl Iterator<Item = &[ShadedCell]> {
        self.cells.chunks(self.width)
    }
    /// Rows as plain text, dropping highlighting
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.symbol).collect())
            .collect()
    }
}

/// Converts per-pixel brightness into printable cells
pub trait Rasterizer {
    /// Cell for a pixel, `None` meaning nothing was drawn there
    fn shade(&self, brightness: Option<f32>) -> ShadedCell;
    fn bg_char(&self) -> char;

    fn pixels_to_grid(&self, pixels: &[Option<f32>], width: usize) -> CellGrid {
        let cells: Vec<ShadedCell> = pixels.iter().map(|p| self.shade(*p)).collect();
        CellGrid::new(width, pixels.len() / width.max(1), cells)
    }
}

/// Picks one glyph per pixel from a gradient ordered darkest to brightest
#[derive(Debug, Clone)]
pub struct GlyphRasterizer {
    gradient: Vec<char>,
    highlight_threshold: f32,
    background: char,
}

impl GlyphRasterizer {
    pub fn new(
        gradient: Vec<char>,
        highlight_threshold: f32,
        background: char,
    ) -> Result<GlyphRasterizer, RasterizerError> {
        if gradient.is_empty() {
            return Err(RasterizerError::EmptyGradient);
        }
        if !highlight_threshold.is_finite() {
            return Err(RasterizerError::InvalidThreshold);
        }
        Ok(GlyphRasterizer {
            gradient,
            highlight_threshold,
            background,
        })
    }

    pub fn from_config(config: &RenderConfig) -> Result<GlyphRasterizer, RasterizerError> {
        Self::new(
            config.palette.clone(),
            config.highlight_threshold,
            config.background,
        )
    }

    /// Index into the gradient, `floor(brightness * (len - 1))` clamped to the gradient
    pub fn glyph_index(&self, brightness: f32) -> usize {
        let last = self.gradient.len() - 1;
        let idx = (brightness * last as f32).floor();
        if idx.is_nan() || idx < 0.0 {
            0
        } else {
            (idx as usize).min(last)
        }
    }

    fn brightness_to_char(&self, brightness: f32) -> ShadedCell {
        ShadedCell {
            symbol: self.gradient[self.glyph_index(brightness)],
            highlighted: brightness > self.highlight_threshold,
        }
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        GlyphRasterizer::from_config(&RenderConfig::default()).unwrap()
    }
}

impl Rasterizer for GlyphRasterizer {
    fn shade(&self, brightness: Option<f32>) -> ShadedCell {
        match brightness {
            Some(b) => self.brightness_to_char(b),
            None => ShadedCell::plain(self.background),
        }
    }
    fn bg_char(&self) -> char {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rasterizer() {
        let rasterizer = GlyphRasterizer::default();
        assert_eq!(rasterizer.shade(Some(0.0)).symbol, '.');
        assert_eq!(rasterizer.shade(Some(0.15)).symbol, '\'');
        assert_eq!(rasterizer.shade(Some(0.5)).symbol, '?');
        assert_eq!(rasterizer.shade(Some(1.0)).symbol, '$');
        assert_eq!(rasterizer.shade(None).symbol, rasterizer.bg_char());
        assert!(!rasterizer.shade(None).highlighted);
    }

    #[test]
    fn test_out_of_range_brightness_is_clamped() {
        let rasterizer = GlyphRasterizer::default();
        assert_eq!(rasterizer.glyph_index(-0.3), 0);
        assert_eq!(rasterizer.glyph_index(1.7), 9);
        assert_eq!(rasterizer.glyph_index(f32::NAN), 0);
    }

    #[test]
    fn test_glyph_index_is_monotonic() {
        let rasterizer = GlyphRasterizer::default();
        let mut previous = 0;
        for i in 0..=1000 {
            let idx = rasterizer.glyph_index(i as f32 / 1000.0);
            assert!(idx >= previous);
            previous = idx;
        }
        assert_eq!(previous, 9);
    }

    #[test]
    fn test_highlight_threshold_is_strict() {
        let rasterizer = GlyphRasterizer::default();
        assert!(!rasterizer.shade(Some(0.75)).highlighted);
        assert!(rasterizer.shade(Some(0.7501)).highlighted);
        assert!(rasterizer.shade(Some(1.0)).highlighted);
        assert!(!rasterizer.shade(Some(0.0)).highlighted);
    }

    #[test]
    fn test_single_glyph_gradient() {
        let rasterizer = GlyphRasterizer::new(vec!['#'], 0.5, ' ').unwrap();
        assert_eq!(rasterizer.shade(Some(0.0)).symbol, '#');
        assert_eq!(rasterizer.shade(Some(1.0)).symbol, '#');
    }

    #[test]
    fn test_empty_gradient_error() {
        let rasterizer = GlyphRasterizer::new(vec![], 0.75, ' ');
        assert!(rasterizer.is_err_and(|x| x == RasterizerError::EmptyGradient));
    }

    #[test]
    fn test_invalid_threshold_error() {
        let rasterizer = GlyphRasterizer::new(vec!['.'], f32::NAN, ' ');
        assert!(rasterizer.is_err_and(|x| x == RasterizerError::InvalidThreshold));
    }

    #[test]
    #[should_panic(expected = "at least one cell wide")]
    fn test_zero_width_grid_is_rejected() {
        CellGrid::new(0, 0, vec![]);
    }

    #[test]
    fn test_pixels_to_grid() {
        let rasterizer = GlyphRasterizer::default();
        let pixels = vec![None, Some(1.0), Some(0.0), None, None, Some(0.5)];
        let grid = rasterizer.pixels_to_grid(&pixels, 3);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_lines(), vec![" $.".to_string(), "  ?".to_string()]);
        assert!(grid.get(1, 0).is_some_and(|c| c.highlighted));
        assert!(grid.get(3, 0).is_none());
    }
}
