// Rasterizing the sampled cube into per-pixel depth and brightness
use crate::config::{ConfigError, RenderConfig};
use crate::geometry::{CubeSampler, Orientation, SurfaceSample};
use crate::projection::Projection;
use crate::rasterizer::{CellGrid, GlyphRasterizer, Rasterizer};
use crate::shading::Lighting;

/// Depth of a pixel nothing has been drawn to
pub const DEPTH_EMPTY: f32 = f32::INFINITY;

/// Where pixels are accumulated before being turned into characters
pub struct Canvas<R: Rasterizer = GlyphRasterizer> {
    /// Nearest depth seen per pixel in the current frame
    pub z_buffer: Vec<f32>,
    /// Brightness of the nearest sample, only meaningful where the depth is not empty
    pub brightness_buffer: Vec<f32>,
    width: usize,
    height: usize,
    rasterizer: R,
}

impl<R: Rasterizer> Canvas<R> {
    pub fn new(width: usize, height: usize, rasterizer: R) -> Self {
        Self {
            z_buffer: vec![DEPTH_EMPTY; width * height],
            brightness_buffer: vec![0.0; width * height],
            width,
            height,
            rasterizer,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Overwrite every pixel so nothing carries over from the previous frame
    pub fn reset(&mut self) {
        self.z_buffer.fill(DEPTH_EMPTY);
        self.brightness_buffer.fill(0.0);
    }
    /// Change the canvas size, discarding its contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.z_buffer = vec![DEPTH_EMPTY; width * height];
        self.brightness_buffer = vec![0.0; width * height];
    }
    /// Depth test a sample against the pixel at `(column, row)`.
    /// Returns whether the sample was kept
    pub fn plot(&mut self, column: usize, row: usize, depth: f32, brightness: f32) -> bool {
        if column >= self.width || row >= self.height {
            return false;
        }
        let idx = row * self.width + column;
        if depth < self.z_buffer[idx] {
            self.z_buffer[idx] = depth;
            self.brightness_buffer[idx] = brightness;
            true
        } else {
            false
        }
    }
    /// Brightness of a pixel, `None` if nothing was drawn to it
    pub fn pixel(&self, column: usize, row: usize) -> Option<f32> {
        if column >= self.width || row >= self.height {
            return None;
        }
        let idx = row * self.width + column;
        (self.z_buffer[idx] < DEPTH_EMPTY).then_some(self.brightness_buffer[idx])
    }
    /// All pixels row by row
    pub fn pixels(&self) -> Vec<Option<f32>> {
        self.z_buffer
            .iter()
            .zip(self.brightness_buffer.iter())
            .map(|(z, b)| (*z < DEPTH_EMPTY).then_some(*b))
            .collect()
    }
    pub fn to_grid(&self) -> CellGrid {
        self.rasterizer.pixels_to_grid(&self.pixels(), self.width)
    }
}

/// Draws the cube for a given orientation
#[derive(Debug, Clone)]
pub struct CubeRenderer {
    sampler: CubeSampler,
    projection: Projection,
    lighting: Lighting,
}

impl CubeRenderer {
    pub fn new(sampler: CubeSampler, projection: Projection, lighting: Lighting) -> Self {
        Self {
            sampler,
            projection,
            lighting,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            CubeSampler::new(config.half_extent, config.step_u, config.step_v),
            Projection::new(config.distance, config.aspect, config.width, config.height),
            Lighting::from_config(config),
        ))
    }

    /// Depth test and shade a single rotated sample
    pub fn draw_sample<R: Rasterizer>(
        &self,
        canvas: &mut Canvas<R>,
        sample: &SurfaceSample,
    ) -> bool {
        if !self.lighting.is_front_facing(&sample.normal) {
            return false;
        }
        let brightness = self.lighting.brightness(&sample.normal);
        match self.projection.to_cell(&sample.position) {
            Some((column, row)) => canvas.plot(column, row, sample.position.z, brightness),
            None => false,
        }
    }

    /// Clear the canvas and draw every face sample rotated by `orientation`
    pub fn draw_cube_to_canvas<R: Rasterizer>(
        &self,
        canvas: &mut Canvas<R>,
        orientation: &Orientation,
    ) {
        if canvas.width() != self.projection.width || canvas.height() != self.projection.height {
            canvas.resize(self.projection.width, self.projection.height);
        }
        canvas.reset();
        let rotation = orientation.rotation();
        for sample in self.sampler.samples() {
            self.draw_sample(canvas, &sample.rotated(&rotation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CubeFace;
    use nalgebra::Vector3;

    fn small_canvas() -> Canvas {
        Canvas::new(4, 3, GlyphRasterizer::default())
    }

    #[test]
    fn test_nearer_sample_wins_in_either_order() {
        let mut forwards = small_canvas();
        forwards.plot(1, 1, -2.0, 0.9);
        forwards.plot(1, 1, 3.0, 0.1);

        let mut backwards = small_canvas();
        backwards.plot(1, 1, 3.0, 0.1);
        backwards.plot(1, 1, -2.0, 0.9);

        assert_eq!(forwards.pixel(1, 1), Some(0.9));
        assert_eq!(backwards.pixel(1, 1), Some(0.9));
        assert_eq!(forwards.z_buffer, backwards.z_buffer);
    }

    #[test]
    fn test_equal_depth_keeps_first_sample() {
        let mut canvas = small_canvas();
        assert!(canvas.plot(0, 0, 1.0, 0.3));
        assert!(!canvas.plot(0, 0, 1.0, 0.8));
        assert_eq!(canvas.pixel(0, 0), Some(0.3));
    }

    #[test]
    fn test_empty_pixels_are_none() {
        let mut canvas = small_canvas();
        canvas.plot(3, 2, 0.0, 0.5);
        let pixels = canvas.pixels();
        assert_eq!(pixels.iter().filter(|p| p.is_some()).count(), 1);
        assert_eq!(pixels[2 * 4 + 3], Some(0.5));
        assert_eq!(canvas.pixel(0, 0), None);
        assert!(!canvas.plot(4, 0, 0.0, 0.5));
    }

    #[test]
    fn test_reset_clears_previous_frame() {
        let mut canvas = small_canvas();
        canvas.plot(2, 1, 0.0, 1.0);
        canvas.reset();
        assert!(canvas.pixels().iter().all(|p| p.is_none()));
        assert!(canvas.z_buffer.iter().all(|z| *z == DEPTH_EMPTY));
    }

    #[test]
    fn test_back_facing_sample_is_not_drawn() {
        let renderer = CubeRenderer::from_config(&RenderConfig::default()).unwrap();
        let mut canvas = Canvas::new(80, 40, GlyphRasterizer::default());
        let back = SurfaceSample {
            face: CubeFace::Back,
            position: CubeFace::Back.point(0.0, 0.0, 7.0),
            normal: CubeFace::Back.normal(),
        };
        assert!(!renderer.draw_sample(&mut canvas, &back));
        let front = SurfaceSample {
            face: CubeFace::Front,
            position: CubeFace::Front.point(0.0, 0.0, 7.0),
            normal: CubeFace::Front.normal(),
        };
        assert!(renderer.draw_sample(&mut canvas, &front));
        assert!(canvas.pixel(40, 20).is_some());
    }

    #[test]
    fn test_unrotated_cube_shows_only_front_face() {
        let config = RenderConfig::default();
        let renderer = CubeRenderer::from_config(&config).unwrap();
        let mut canvas = Canvas::new(config.width, config.height, GlyphRasterizer::default());
        renderer.draw_cube_to_canvas(&mut canvas, &Orientation::default());
        let expected = Lighting::from_config(&config).brightness(&Vector3::new(0.0, 0.0, -1.0));
        let drawn: Vec<f32> = canvas.pixels().into_iter().flatten().collect();
        assert!(!drawn.is_empty());
        assert!(drawn.iter().all(|b| *b == expected));
        assert!(canvas
            .z_buffer
            .iter()
            .filter(|z| **z < DEPTH_EMPTY)
            .all(|z| *z == -7.0));
    }

    #[test]
    fn test_draw_resizes_canvas_to_projection() {
        let config = RenderConfig::default().with_size(20, 10);
        let renderer = CubeRenderer::from_config(&config).unwrap();
        let mut canvas = small_canvas();
        renderer.draw_cube_to_canvas(&mut canvas, &Orientation::new(0.3, 0.2, 0.1));
        assert_eq!((canvas.width(), canvas.height()), (20, 10));
        assert_eq!(canvas.pixels().len(), 200);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RenderConfig::default().with_size(0, 0);
        assert!(CubeRenderer::from_config(&config).is_err());
    }
}
