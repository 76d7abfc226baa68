//! Fixed-width RGB color with explicit clamping.

/// 8-bit-per-channel RGB color
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from floating-point channels.
    ///
    /// Each channel is clamped into `[0, 255]` and then truncated toward zero,
    /// so any input (negative, oversized, NaN) yields a valid color.
    pub fn from_f32_clamped(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Multiply every channel by `factor` (clamped)
    pub fn scale(self, factor: f32) -> Self {
        Self::from_f32_clamped(
            self.r as f32 * factor,
            self.g as f32 * factor,
            self.b as f32 * factor,
        )
    }

    /// Add a signed offset per channel (clamped)
    pub fn offset(self, delta: [f32; 3]) -> Self {
        Self::from_f32_clamped(
            self.r as f32 + delta[0],
            self.g as f32 + delta[1],
            self.b as f32 + delta[2],
        )
    }

    /// Channels as `[0, 1]` floats, no gamma conversion
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Channels decoded from sRGB into linear `[0, 1]` floats.
    ///
    /// Needed when the swapchain format is sRGB and will re-encode on write.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_unit().map(srgb_to_linear)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

fn clamp_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32_clamps_out_of_range() {
        assert_eq!(Rgb::from_f32_clamped(-10.0, 300.0, 127.9), Rgb::new(0, 255, 127));
        assert_eq!(Rgb::from_f32_clamped(f32::NAN, 0.0, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_scale_truncates_like_integer_cast() {
        let c = Rgb::new(100, 150, 255);
        assert_eq!(c.scale(0.5), Rgb::new(50, 75, 127));
        assert_eq!(c.scale(0.0), Rgb::new(0, 0, 0));
        assert_eq!(c.scale(1.0), c);
        assert_eq!(c.scale(2.0), Rgb::new(200, 255, 255));
    }

    #[test]
    fn test_offset_clamps_each_channel() {
        let c = Rgb::new(10, 128, 250);
        assert_eq!(c.offset([-20.0, 5.0, 20.0]), Rgb::new(0, 133, 255));
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(Rgb::new(0, 0, 0).to_linear(), [0.0, 0.0, 0.0]);
        let white = Rgb::new(255, 255, 255).to_linear();
        for c in white {
            assert!((c - 1.0).abs() < 1e-5);
        }
        // Mid-grey is darker in linear space
        assert!(Rgb::new(128, 128, 128).to_linear()[0] < 0.5);
    }
}
