/// Scalar helpers shared by the generator, the scene and the renderer.

/// Clamp a value to [min, max] range.
#[inline(always)]
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v < min { min } else if v > max { max } else { v }
}

/// Linear interpolation between a and b.
#[inline(always)]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Re-map `v` from [in_min, in_max] onto [out_min, out_max].
///
/// No clamping and no guard against an empty input range; callers that can
/// see `in_min == in_max` must handle it first.
#[inline(always)]
pub fn map_range(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (v - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Pack a channel value in [0, 255] into a byte.
#[inline(always)]
pub fn channel_to_byte(v: f64) -> u8 {
    clamp(v.round(), 0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-10);
        assert!((lerp(0.0, 10.0, 0.0) - 0.0).abs() < 1e-10);
        assert!((lerp(0.0, 10.0, 1.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_map_range() {
        assert!((map_range(-200.0, -200.0, 200.0, 0.0, 1.0) - 0.0).abs() < 1e-12);
        assert!((map_range(0.0, -200.0, 200.0, 0.0, 1.0) - 0.5).abs() < 1e-12);
        assert!((map_range(200.0, -200.0, 200.0, 0.0, 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_channel_to_byte() {
        assert_eq!(channel_to_byte(255.0), 255);
        assert_eq!(channel_to_byte(300.0), 255);
        assert_eq!(channel_to_byte(-4.0), 0);
        assert_eq!(channel_to_byte(127.6), 128);
    }
}
