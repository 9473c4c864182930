//! Luminance projection and rescaling.
//!
//! Luminance-domain operators compress the brightness scalar and then put
//! the result back onto the color, preserving chromaticity ratios. Both
//! helpers live here so the curve modules share one definition.

use tone_core::pixel::{REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};
use tone_math::Vec3;

/// Rec.709 luminance weights as a [`Vec3`].
pub const LUMA_WEIGHTS: Vec3 = Vec3::new(REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B);

/// Perceptual luminance of a linear-light color.
///
/// `Y = 0.2126*R + 0.7152*G + 0.0722*B`
#[inline]
pub fn luminance(c: Vec3) -> f32 {
    c.dot(LUMA_WEIGHTS)
}

/// Rescales a color so its luminance becomes `target_l`.
///
/// Multiplies uniformly by `target_l / luminance(c)`, preserving
/// chromaticity ratios exactly.
///
/// An exactly-black input has zero luminance and no chromaticity to
/// preserve; rather than dividing by zero, the result is black.
///
/// # Example
///
/// ```rust
/// use tone_color::luma::{change_luminance, luminance};
/// use tone_math::Vec3;
///
/// let c = Vec3::new(2.0, 1.0, 0.5);
/// let rescaled = change_luminance(c, 0.5);
/// assert!((luminance(rescaled) - 0.5).abs() < 1e-6);
/// ```
#[inline]
pub fn change_luminance(c: Vec3, target_l: f32) -> Vec3 {
    let l = luminance(c);
    if l == 0.0 {
        return Vec3::ZERO;
    }
    c * (target_l / l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_luminance_matches_weights() {
        let c = Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(luminance(c), 0.2126, epsilon = 1e-6);
    }

    #[test]
    fn test_change_luminance_preserves_ratios() {
        let c = Vec3::new(4.0, 2.0, 1.0);
        let out = change_luminance(c, 0.1);
        assert_relative_eq!(out.x / out.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(out.y / out.z, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_change_luminance_black_stays_black() {
        assert_eq!(change_luminance(Vec3::ZERO, 0.5), Vec3::ZERO);
    }
}
