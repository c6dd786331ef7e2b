//! Visibility and brightness of rotated surface samples
use crate::config::RenderConfig;
use nalgebra::Vector3;

/// Ambient plus diffuse lighting from a single directional light
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    /// Unit vector towards the light
    pub light: Vector3<f32>,
    /// Direction the viewer looks along
    pub view: Vector3<f32>,
    /// Minimum brightness of any visible surface
    pub ambient: f32,
    /// Brightness is raised to `1 / contrast`, values above one brighten midtones
    pub contrast: f32,
}

impl Lighting {
    pub fn new(light: Vector3<f32>, view: Vector3<f32>, ambient: f32, contrast: f32) -> Self {
        let light = light.try_normalize(0.0).unwrap_or(light);
        Self {
            light,
            view,
            ambient,
            contrast,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.light, config.view, config.ambient, config.contrast)
    }

    /// Whether a surface with this normal faces the viewer
    #[inline]
    pub fn is_front_facing(&self, normal: &Vector3<f32>) -> bool {
        normal.dot(&self.view) > 0.0
    }

    /// Cosine between the normal and the light, clamped to zero for back-lit surfaces
    pub fn diffuse(&self, normal: &Vector3<f32>) -> f32 {
        let normal = normal.try_normalize(0.0).unwrap_or(*normal);
        normal.dot(&self.light).max(0.0)
    }

    /// Brightness in `[0, 1]`
    pub fn brightness(&self, normal: &Vector3<f32>) -> f32 {
        let lit = self.ambient + (1.0 - self.ambient) * self.diffuse(normal);
        lit.powf(1.0 / self.contrast).clamp(0.0, 1.0)
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}
