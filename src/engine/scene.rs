/// Scene state: the immutable result of generating the sponge once at
/// startup, plus the constants the renderer reads every frame.

use serde::Deserialize;

use super::error::SpongeError;
use super::sponge::{self, Sponge};
use super::types::{Rgb, Vec3D};
use crate::math::utils;

/// Depth spans narrower than this are treated as a single plane.
const DEPTH_EPSILON: f64 = 1e-12;

/// Interpolation factor used when every cube sits at the same depth.
pub const FLAT_DEPTH_FACTOR: f64 = 0.5;

/// Startup configuration. Every field is optional when decoded from JS.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    /// Fractal recursion depth
    pub level: u32,
    /// Edge length of the level-0 cube, in pixels
    pub initial_size: f64,
    /// Canvas width requested from the host
    pub width: u32,
    /// Canvas height requested from the host
    pub height: u32,
    /// Orbit radius of the point light
    pub light_orbit_radius: f64,
    /// Point light orbit angle per frame, radians
    pub light_orbit_speed: f64,
    /// Global Y rotation per frame, radians
    pub rotation_speed: f64,
    /// Background gray level [0, 255]
    pub background: f64,
    /// Ambient light gray level [0, 255]
    pub ambient_light: f64,
    /// Specular material gray level [0, 255]
    pub specular: f64,
    /// Specular exponent
    pub shininess: f64,
    /// Gradient color of the cubes at min z
    pub near_color: Rgb,
    /// Gradient color of the cubes at max z
    pub far_color: Rgb,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            level: 2,
            initial_size: 300.0,
            width: 800,
            height: 600,
            light_orbit_radius: 500.0,
            light_orbit_speed: 0.02,
            rotation_speed: 0.01,
            background: 0.0,
            ambient_light: 50.0,
            specular: 255.0,
            shininess: 50.0,
            near_color: Rgb::RED,
            far_color: Rgb::BLUE,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SpongeError> {
        sponge::validate(self.level, self.initial_size)?;
        if self.width == 0 || self.height == 0 {
            return Err(SpongeError::InvalidCanvas { width: self.width, height: self.height });
        }
        Ok(())
    }
}

/// Generated sponge plus its color-gradient bounds. Never mutated after
/// construction.
#[derive(Clone, Debug)]
pub struct SceneState {
    config: SceneConfig,
    sponge: Sponge,
    min_z: f64,
    max_z: f64,
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Result<Self, SpongeError> {
        config.validate()?;
        let sponge = sponge::generate_sponge(config.level, config.initial_size)?;
        let (min_z, max_z) = sponge.depth_range();

        tracing::info!(
            level = config.level,
            cubes = sponge.positions.len(),
            cube_size = sponge.size,
            min_z,
            max_z,
            "generated Menger sponge"
        );
        if max_z - min_z <= DEPTH_EPSILON {
            tracing::warn!(z = min_z, "flat depth range, gradient fixed at midpoint");
        }

        Ok(Self { config, sponge, min_z, max_z })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn positions(&self) -> &[Vec3D] {
        &self.sponge.positions
    }

    pub fn cube_size(&self) -> f64 {
        self.sponge.size
    }

    pub fn min_z(&self) -> f64 {
        self.min_z
    }

    pub fn max_z(&self) -> f64 {
        self.max_z
    }

    /// Normalized depth of `z` within [minZ, maxZ], clamped to [0, 1].
    pub fn depth_factor(&self, z: f64) -> f64 {
        let span = self.max_z - self.min_z;
        if span <= DEPTH_EPSILON {
            return FLAT_DEPTH_FACTOR;
        }
        utils::clamp(utils::map_range(z, self.min_z, self.max_z, 0.0, 1.0), 0.0, 1.0)
    }

    /// Gradient color for a cube at depth `z`.
    pub fn cube_color(&self, z: f64) -> Rgb {
        Rgb::lerp(self.config.near_color, self.config.far_color, self.depth_factor(z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene() {
        let scene = SceneState::new(SceneConfig::default()).unwrap();
        assert_eq!(scene.positions().len(), 400);
        assert!((scene.cube_size() - 300.0 / 9.0).abs() < 1e-9);
        assert!(scene.min_z() < scene.max_z());
        for p in scene.positions() {
            assert!(scene.min_z() <= p.z && p.z <= scene.max_z());
        }
    }

    #[test]
    fn test_gradient_endpoints() {
        let scene = SceneState::new(SceneConfig::default()).unwrap();
        assert_eq!(scene.cube_color(scene.min_z()).to_bytes(), [255, 0, 0]);
        assert_eq!(scene.cube_color(scene.max_z()).to_bytes(), [0, 0, 255]);
    }

    #[test]
    fn test_depth_factor_clamped() {
        let scene = SceneState::new(SceneConfig::default()).unwrap();
        assert_eq!(scene.depth_factor(scene.min_z() - 1000.0), 0.0);
        assert_eq!(scene.depth_factor(scene.max_z() + 1000.0), 1.0);
        assert!((scene.depth_factor(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_level_zero_uses_midpoint() {
        let config = SceneConfig { level: 0, ..SceneConfig::default() };
        let scene = SceneState::new(config).unwrap();
        assert_eq!(scene.positions(), &[Vec3D::ORIGIN]);
        assert_eq!(scene.depth_factor(0.0), FLAT_DEPTH_FACTOR);
        let c = scene.cube_color(0.0);
        assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
        assert!((c.r - 127.5).abs() < 1e-10);
        assert!((c.b - 127.5).abs() < 1e-10);
    }

    #[test]
    fn test_validation() {
        let bad_size = SceneConfig { initial_size: -1.0, ..SceneConfig::default() };
        assert_eq!(SceneState::new(bad_size).unwrap_err(), SpongeError::InvalidSize(-1.0));

        let bad_canvas = SceneConfig { width: 0, ..SceneConfig::default() };
        assert_eq!(
            bad_canvas.validate().unwrap_err(),
            SpongeError::InvalidCanvas { width: 0, height: 600 }
        );
    }
}
