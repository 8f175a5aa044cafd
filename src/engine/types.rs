/// Core value types shared by the generator, the scene and the renderer.

use serde::Deserialize;

use crate::math::utils;

/// 3D vector with f64 precision. Also used as the center of one cube.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3D {
    pub const ORIGIN: Vec3D = Vec3D { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// RGB color with channels in [0, 255], kept as f64 so interpolated
/// values are not rounded until they reach the host.
#[derive(Clone, Copy, Default, Debug, PartialEq, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);
    pub const RED: Rgb = Rgb::new(255.0, 0.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 255.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation, `t` clamped to [0, 1].
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = utils::clamp(t, 0.0, 1.0);
        Rgb {
            r: utils::lerp(a.r, b.r, t),
            g: utils::lerp(a.g, b.g, t),
            b: utils::lerp(a.b, b.b, t),
        }
    }

    /// Rounded byte triple for the host.
    pub fn to_bytes(self) -> [u8; 3] {
        [
            utils::channel_to_byte(self.r),
            utils::channel_to_byte(self.g),
            utils::channel_to_byte(self.b),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_lerp_endpoints() {
        assert_eq!(Rgb::lerp(Rgb::RED, Rgb::BLUE, 0.0), Rgb::RED);
        assert_eq!(Rgb::lerp(Rgb::RED, Rgb::BLUE, 1.0), Rgb::BLUE);
    }

    #[test]
    fn test_rgb_lerp_midpoint_and_clamp() {
        let mid = Rgb::lerp(Rgb::RED, Rgb::BLUE, 0.5);
        assert!((mid.r - 127.5).abs() < 1e-10);
        assert!(mid.g.abs() < 1e-10);
        assert!((mid.b - 127.5).abs() < 1e-10);

        assert_eq!(Rgb::lerp(Rgb::RED, Rgb::BLUE, -3.0), Rgb::RED);
        assert_eq!(Rgb::lerp(Rgb::RED, Rgb::BLUE, 7.0), Rgb::BLUE);
    }

    #[test]
    fn test_rgb_to_bytes() {
        assert_eq!(Rgb::RED.to_bytes(), [255, 0, 0]);
        assert_eq!(Rgb::new(50.0, 50.4, 49.6).to_bytes(), [50, 50, 50]);
    }
}
