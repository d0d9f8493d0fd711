//! Four-channel color values.
//!
//! Colors flow through samplers as plain `[r, g, b, a]` arrays of `f32`
//! in the `[0, 1]` range. The 0-255 byte scale only appears at the bitmap
//! boundary in `sampl-io`; the conversions live here so both sides agree on
//! rounding.
//!
//! # Memory Layout
//!
//! ```text
//! [R, G, B, A]   each f32, 0.0 = none, 1.0 = full
//! ```

/// RGBA color with channels in `[0, 1]`, alpha last.
pub type Rgba = [f32; 4];

/// Fully transparent black. The neutral start of every compositing fold.
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];

/// Opaque black.
pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Opaque white.
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Rec.709 luminance coefficient for red channel.
///
/// Used in the standard luminance formula: `Y = 0.2126*R + 0.7152*G + 0.0722*B`
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f32; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Calculates Rec.709 luminance of a color, ignoring alpha.
///
/// # Example
/// ```
/// use sampl_core::luminance_rec709;
/// let luma = luminance_rec709([0.5, 0.3, 0.2, 1.0]);
/// // 0.5 * 0.2126 + 0.3 * 0.7152 + 0.2 * 0.0722 = 0.3353
/// assert!((luma - 0.3353).abs() < 0.0001);
/// ```
#[inline]
pub fn luminance_rec709(c: Rgba) -> f32 {
    c[0] * REC709_LUMA_R + c[1] * REC709_LUMA_G + c[2] * REC709_LUMA_B
}

/// Converts an 8-bit channel to the normalized float scale.
#[inline]
pub fn channel_from_u8(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Converts a normalized float channel to 8 bits.
///
/// Values are clamped to `[0, 1]` and rounded to the nearest step.
/// NaN maps to 0.
///
/// # Example
///
/// ```
/// use sampl_core::color::channel_to_u8;
///
/// assert_eq!(channel_to_u8(1.0), 255);
/// assert_eq!(channel_to_u8(0.5), 128);
/// assert_eq!(channel_to_u8(-3.0), 0);
/// assert_eq!(channel_to_u8(7.0), 255);
/// ```
#[inline]
pub fn channel_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Converts an 8-bit RGBA quadruple to [`Rgba`].
#[inline]
pub fn rgba_from_u8(px: [u8; 4]) -> Rgba {
    px.map(channel_from_u8)
}

/// Converts [`Rgba`] to an 8-bit RGBA quadruple.
#[inline]
pub fn rgba_to_u8(c: Rgba) -> [u8; 4] {
    c.map(channel_to_u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_u8_roundtrip() {
        for v in [0u8, 1, 127, 128, 200, 255] {
            assert_eq!(channel_to_u8(channel_from_u8(v)), v);
        }
    }

    #[test]
    fn test_rgba_conversion() {
        let c = rgba_from_u8([255, 0, 51, 255]);
        assert_abs_diff_eq!(c[0], 1.0);
        assert_abs_diff_eq!(c[2], 0.2, epsilon = 1e-6);
        assert_eq!(rgba_to_u8(c), [255, 0, 51, 255]);
    }

    #[test]
    fn test_luminance_white() {
        assert_abs_diff_eq!(luminance_rec709(WHITE), 1.0, epsilon = 1e-6);
        assert_eq!(luminance_rec709(TRANSPARENT), 0.0);
    }
}
