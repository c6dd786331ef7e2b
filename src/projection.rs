//! Perspective projection from view space onto the character grid
use nalgebra::Vector3;

/// Projection onto a grid of `width` x `height` character cells
///
/// There is no camera transform, the eye looks along -z at the origin and the
/// point `distance` units behind the origin maps to infinity.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub distance: f32,
    /// Horizontal stretch, since terminal characters are roughly twice as tall as wide
    pub aspect: f32,
    pub width: usize,
    pub height: usize,
}

impl Projection {
    pub fn new(distance: f32, aspect: f32, width: usize, height: usize) -> Self {
        Self {
            distance,
            aspect,
            width,
            height,
        }
    }

    /// Perspective scale for a point at depth `z`
    // NOTE Diverges as `distance + z` approaches zero, points at the eye are not guarded against
    #[inline]
    pub fn scale(&self, z: f32) -> f32 {
        self.distance / (self.distance + z)
    }

    /// Screen coordinates of `point`, truncated towards zero.
    /// May lie outside the grid, see `to_cell`
    pub fn project(&self, point: &Vector3<f32>) -> (i32, i32) {
        let scale = self.scale(point.z);
        let x = (self.width / 2) as f32 + point.x * scale * self.aspect;
        let y = (self.height / 2) as f32 - point.y * scale;
        (x as i32, y as i32)
    }

    /// Column and row of the cell `point` lands in, or `None` when it falls off the grid
    pub fn to_cell(&self, point: &Vector3<f32>) -> Option<(usize, usize)> {
        let (x, y) = self.project(point);
        let column = usize::try_from(x).ok().filter(|c| *c < self.width)?;
        let row = usize::try_from(y).ok().filter(|r| *r < self.height)?;
        Some((column, row))
    }
}
