//! Driving the rotation frame after frame
use crate::config::{AnimationConfig, ConfigError, RenderConfig};
use crate::geometry::Orientation;
use crate::rasterizer::{CellGrid, GlyphRasterizer};
use crate::render::{Canvas, CubeRenderer};
use crate::tui::sink::FrameSink;
use std::io::Result;
use tracing::{debug, info, trace};

/// Rotation state plus everything needed to render it
pub struct Animation {
    renderer: CubeRenderer,
    canvas: Canvas<GlyphRasterizer>,
    orientation: Orientation,
    config: AnimationConfig,
    frames: u64,
}

impl Animation {
    pub fn new(
        render: &RenderConfig,
        config: AnimationConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let renderer = CubeRenderer::from_config(render)?;
        let rasterizer = GlyphRasterizer::from_config(render)?;
        let canvas = Canvas::new(render.width, render.height, rasterizer);
        debug!(
            width = render.width,
            height = render.height,
            half_extent = render.half_extent,
            "Created animation"
        );
        Ok(Self {
            renderer,
            canvas,
            orientation: Orientation::default(),
            config,
            frames: 0,
        })
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Compute the grid for the current orientation without touching any display
    pub fn render_frame(&mut self) -> CellGrid {
        self.renderer
            .draw_cube_to_canvas(&mut self.canvas, &self.orientation);
        self.canvas.to_grid()
    }

    /// Step the rotation by one frame's worth
    pub fn advance(&mut self) {
        self.orientation.advance(&self.config.delta);
    }

    fn limit_reached(&self) -> bool {
        self.config.max_frames.is_some_and(|max| self.frames >= max)
    }

    /// Present frames to `sink` until the frame limit is hit or the sink asks to stop.
    /// The sink is always finished, even when `begin` or presenting fails
    pub fn run<S: FrameSink>(&mut self, sink: &mut S) -> Result<u64> {
        let result = sink.begin().and_then(|()| {
            info!(max_frames = ?self.config.max_frames, "Starting animation");
            self.run_frames(sink)
        });
        let finished = sink.finish();
        let frames = result?;
        finished?;
        info!(frames, "Stopped animation");
        Ok(frames)
    }

    fn run_frames<S: FrameSink>(&mut self, sink: &mut S) -> Result<u64> {
        let start = self.frames;
        while !self.limit_reached() {
            let grid = self.render_frame();
            sink.present(&grid)?;
            self.frames += 1;
            trace!(frame = self.frames, orientation = ?self.orientation, "Presented frame");
            self.advance();
            if sink.poll_quit()? {
                debug!("Quit requested");
                break;
            }
            if self.limit_reached() {
                break;
            }
            std::thread::sleep(self.config.interval);
        }
        Ok(self.frames - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::CellGrid;
    use crate::tui::sink::RecordingSink;
    use std::io::{Error, ErrorKind};
    use std::time::Duration;

    #[derive(Default)]
    struct BrokenSetupSink {
        presented: usize,
        finished: bool,
    }

    impl FrameSink for BrokenSetupSink {
        fn begin(&mut self) -> Result<()> {
            Err(Error::new(ErrorKind::Other, "no terminal"))
        }
        fn present(&mut self, _grid: &CellGrid) -> Result<()> {
            self.presented += 1;
            Ok(())
        }
        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn quick_config(max_frames: Option<u64>) -> AnimationConfig {
        AnimationConfig {
            interval: Duration::ZERO,
            max_frames,
            ..AnimationConfig::default()
        }
    }

    fn small_render() -> RenderConfig {
        RenderConfig::default().with_size(40, 20)
    }

    #[test]
    fn test_runs_for_frame_limit() {
        let mut animation = Animation::new(&small_render(), quick_config(Some(5))).unwrap();
        let mut sink = RecordingSink::default();
        assert_eq!(animation.run(&mut sink).unwrap(), 5);
        assert_eq!(sink.frames.len(), 5);
        assert!(sink.began && sink.finished);
        assert_eq!(animation.frames(), 5);
    }

    #[test]
    fn test_zero_frame_limit_presents_nothing() {
        let mut animation = Animation::new(&small_render(), quick_config(Some(0))).unwrap();
        let mut sink = RecordingSink::default();
        assert_eq!(animation.run(&mut sink).unwrap(), 0);
        assert!(sink.frames.is_empty());
        assert!(sink.finished);
    }

    #[test]
    fn test_sink_can_stop_unbounded_run() {
        let mut animation = Animation::new(&small_render(), quick_config(None)).unwrap();
        let mut sink = RecordingSink::quit_after(3);
        assert_eq!(animation.run(&mut sink).unwrap(), 3);
        assert_eq!(sink.frames.len(), 3);
    }

    #[test]
    fn test_sink_is_finished_when_begin_fails() {
        let mut animation = Animation::new(&small_render(), quick_config(Some(3))).unwrap();
        let mut sink = BrokenSetupSink::default();
        let result = animation.run(&mut sink);
        assert!(result.is_err_and(|e| e.kind() == ErrorKind::Other));
        assert!(sink.finished);
        assert_eq!(sink.presented, 0);
        assert_eq!(animation.frames(), 0);
    }

    #[test]
    fn test_orientation_advances_per_frame() {
        let mut animation = Animation::new(&small_render(), quick_config(Some(10))).unwrap();
        animation.run(&mut RecordingSink::default()).unwrap();
        let orientation = animation.orientation();
        assert!((orientation.x - 0.4).abs() <= 1e-4);
        assert!((orientation.y - 0.6).abs() <= 1e-4);
        assert!((orientation.z - 0.2).abs() <= 1e-4);
    }

    #[test]
    fn test_frames_change_as_cube_rotates() {
        let mut animation = Animation::new(&small_render(), quick_config(Some(2))).unwrap();
        let mut sink = RecordingSink::default();
        animation.run(&mut sink).unwrap();
        assert_ne!(sink.frames[0], sink.frames[1]);
    }

    #[test]
    fn test_render_frame_is_repeatable() {
        let mut animation = Animation::new(&small_render(), quick_config(None)).unwrap();
        animation.set_orientation(Orientation::new(1.0, 2.0, 3.0));
        let first = animation.render_frame();
        let second = animation.render_frame();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_invalid_render_config() {
        let mut render = small_render();
        render.palette.clear();
        assert!(Animation::new(&render, quick_config(None)).is_err());
    }
}
