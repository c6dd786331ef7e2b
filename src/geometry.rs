//! Sample points covering the surface of a cube and the rotations applied to them
use nalgebra::{Rotation3, Vector3};

/// One of the six axis-aligned faces of a cube centred on the origin
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CubeFace {
    Front,
    Back,
    Bottom,
    Top,
    Left,
    Right,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Bottom,
        CubeFace::Top,
        CubeFace::Left,
        CubeFace::Right,
    ];

    /// Outward unit normal in object space
    pub fn normal(&self) -> Vector3<f32> {
        match self {
            Self::Front => Vector3::new(0.0, 0.0, -1.0),
            Self::Back => Vector3::new(0.0, 0.0, 1.0),
            Self::Bottom => Vector3::new(0.0, -1.0, 0.0),
            Self::Top => Vector3::new(0.0, 1.0, 0.0),
            Self::Left => Vector3::new(-1.0, 0.0, 0.0),
            Self::Right => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// Point on this face for the face parameters `(u, v)`
    pub fn point(&self, u: f32, v: f32, half_extent: f32) -> Vector3<f32> {
        let h = half_extent;
        match self {
            Self::Front => Vector3::new(u, v, -h),
            Self::Back => Vector3::new(u, v, h),
            Self::Bottom => Vector3::new(u, -h, v),
            Self::Top => Vector3::new(u, h, v),
            Self::Left => Vector3::new(-h, u, v),
            Self::Right => Vector3::new(h, u, v),
        }
    }
}

/// A point on the cube's surface together with the normal of its face
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SurfaceSample {
    pub face: CubeFace,
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
}

impl SurfaceSample {
    pub fn rotated(&self, rotation: &Rotation3<f32>) -> Self {
        Self {
            face: self.face,
            position: rotation * self.position,
            normal: rotation * self.normal,
        }
    }
}

/// Parameter values `-half_extent, -half_extent + step, ...` strictly below `half_extent`
fn parameter_range(half_extent: f32, step: f32) -> impl Iterator<Item = f32> + Clone {
    (0u32..)
        .map(move |i| -half_extent + i as f32 * step)
        .take_while(move |t| *t < half_extent)
}

/// Grid of samples covering all six faces
#[derive(Debug, Clone)]
pub struct CubeSampler {
    pub half_extent: f32,
    pub step_u: f32,
    pub step_v: f32,
}

impl CubeSampler {
    pub fn new(half_extent: f32, step_u: f32, step_v: f32) -> Self {
        Self {
            half_extent,
            step_u,
            step_v,
        }
    }

    /// Every `(u, v)` pair of the sampling grid
    pub fn parameters(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        let vs = parameter_range(self.half_extent, self.step_v);
        parameter_range(self.half_extent, self.step_u)
            .flat_map(move |u| vs.clone().map(move |v| (u, v)))
    }

    /// Six samples, one per face, for each `(u, v)` pair
    pub fn samples(&self) -> impl Iterator<Item = SurfaceSample> + '_ {
        self.parameters().flat_map(move |(u, v)| {
            CubeFace::ALL.into_iter().map(move |face| SurfaceSample {
                face,
                position: face.point(u, v, self.half_extent),
                normal: face.normal(),
            })
        })
    }
}

/// Cumulative rotation angles about the x, y and z axes in radians.
/// Never wrapped, the trigonometry takes care of periodicity
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn advance(&mut self, delta: &Vector3<f32>) {
        self.x += delta.x;
        self.y += delta.y;
        self.z += delta.z;
    }

    /// Rotation about x first, then y, then z
    pub fn rotation(&self) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z);
        rz * ry * rx
    }

    pub fn apply(&self, v: &Vector3<f32>) -> Vector3<f32> {
        rotate_z(&rotate_y(&rotate_x(v, self.x), self.y), self.z)
    }
}

pub fn rotate_x(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos)
}

pub fn rotate_y(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

pub fn rotate_z(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos, v.z)
}
