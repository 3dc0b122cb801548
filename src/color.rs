//! Normalized floating-point color used by the float stages
//!
//! Channel values are in `[0, 1]` after decoding; intermediate stages may
//! leave them anywhere in that range and quantization clamps on the way out.

/// Luminance weights for red, green and blue, normalized by [`LUMA_DIVISOR`].
pub const LUMA_WEIGHTS: [f32; 3] = [2.0, 3.0, 1.0];

/// Sum of [`LUMA_WEIGHTS`].
pub const LUMA_DIVISOR: f32 = 6.0;

/// A normalized RGB color (alpha is not tracked by the float stages).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode the first three channels of an 8-bit RGBA pixel, ignoring alpha.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(px[0] as f32 / 255.0, px[1] as f32 / 255.0, px[2] as f32 / 255.0)
    }

    /// Quantize to 8-bit RGBA with a fully opaque alpha channel.
    pub fn to_rgba8(self) -> [u8; 4] {
        [quantize(self.r), quantize(self.g), quantize(self.b), 255]
    }

    /// Weighted brightness, `(2R + 3G + B) / 6`.
    #[inline]
    pub fn luminance(self) -> f32 {
        (self.r * LUMA_WEIGHTS[0] + self.g * LUMA_WEIGHTS[1] + self.b * LUMA_WEIGHTS[2])
            / LUMA_DIVISOR
    }

    /// Pull this color toward the average of three neighbors.
    ///
    /// Each channel becomes `self * (1 - strength) + ((a + b + c) / 3) * strength`.
    #[inline]
    pub fn blend(self, a: Rgb, b: Rgb, c: Rgb, strength: f32) -> Rgb {
        Rgb::new(
            blend_channel(self.r, a.r, b.r, c.r, strength),
            blend_channel(self.g, a.g, b.g, c.g, strength),
            blend_channel(self.b, a.b, b.b, c.b, strength),
        )
    }

    /// Bilinear interpolation between four corner colors.
    ///
    /// `f` weights the bottom row against the top row, `g` the right column
    /// against the left column.
    #[inline]
    pub fn interpolate(tl: Rgb, tr: Rgb, bl: Rgb, br: Rgb, f: f32, g: f32) -> Rgb {
        Rgb::new(
            interpolate(tl.r, tr.r, bl.r, br.r, f, g),
            interpolate(tl.g, tr.g, bl.g, br.g, f, g),
            interpolate(tl.b, tr.b, bl.b, br.b, f, g),
        )
    }
}

/// Blend one channel toward the mean of three neighbor values.
#[inline]
pub fn blend_channel(cc: f32, a: f32, b: f32, c: f32, strength: f32) -> f32 {
    cc * (1.0 - strength) + ((a + b + c) / 3.0) * strength
}

/// Two nested linear interpolations: first top-to-bottom by `f`, then left-to-right by `g`.
#[inline]
pub fn interpolate(tl: f32, tr: f32, bl: f32, br: f32, f: f32, g: f32) -> f32 {
    let l = tl * (1.0 - f) + bl * f;
    let r = tr * (1.0 - f) + br * f;
    l * (1.0 - g) + r * g
}

/// Map a normalized value to a byte: `clamp(round(v * 255), 0, 255)`.
#[inline]
pub fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert!((Rgb::new(1.0, 0.0, 0.0).luminance() - 2.0 / 6.0).abs() < 1e-6);
        assert!((Rgb::new(0.0, 1.0, 0.0).luminance() - 0.5).abs() < 1e-6);
        assert!((Rgb::new(0.0, 0.0, 1.0).luminance() - 1.0 / 6.0).abs() < 1e-6);
        assert_eq!(Rgb::new(1.0, 1.0, 1.0).luminance(), 1.0);
        assert_eq!(Rgb::default().luminance(), 0.0);
    }

    #[test]
    fn test_quantize_rounds_and_clamps() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(-0.5), 0);
        assert_eq!(quantize(3.0), 255);
        // 0.5 * 255 = 127.5 rounds away from zero
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(100.0 / 255.0), 100);
    }

    #[test]
    fn test_rgba8_roundtrip() {
        for v in [0u8, 1, 17, 127, 128, 200, 254, 255] {
            let c = Rgb::from_rgba8([v, 255 - v, v / 2, 0]);
            assert_eq!(c.to_rgba8(), [v, 255 - v, v / 2, 255]);
        }
    }

    #[test]
    fn test_blend_strength_bounds() {
        let cc = Rgb::new(0.2, 0.4, 0.6);
        let n = Rgb::new(0.8, 0.8, 0.8);

        // Zero strength leaves the center untouched
        assert_eq!(cc.blend(n, n, n, 0.0), cc);

        // Full strength takes the neighbor mean
        let full = cc.blend(n, n, n, 1.0);
        assert!((full.r - 0.8).abs() < 1e-6);
        assert!((full.g - 0.8).abs() < 1e-6);
        assert!((full.b - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_blend_channel_mean() {
        let v = blend_channel(0.0, 0.3, 0.6, 0.9, 0.5);
        assert!((v - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_interpolate_anchors() {
        let (tl, tr, bl, br) = (0.1, 0.2, 0.3, 0.4);
        assert_eq!(interpolate(tl, tr, bl, br, 0.0, 0.0), tl);
        assert!((interpolate(tl, tr, bl, br, 1.0, 0.0) - bl).abs() < 1e-6);
        assert!((interpolate(tl, tr, bl, br, 0.0, 1.0) - tr).abs() < 1e-6);
        assert!((interpolate(tl, tr, bl, br, 1.0, 1.0) - br).abs() < 1e-6);
        assert!((interpolate(tl, tr, bl, br, 0.5, 0.5) - 0.25).abs() < 1e-6);
    }
}
