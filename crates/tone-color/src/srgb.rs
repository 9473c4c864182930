//! sRGB transfer function and 8-bit quantization.
//!
//! The last two steps of the pipeline: encode linear light with the sRGB
//! piecewise curve, then truncate to a byte.
//!
//! # Range
//!
//! - Input/Output: [0, 1]; values outside must be clamped by the caller
//!   (or use [`encode8`], which clamps before quantizing)
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

use tone_math::Vec3;

/// sRGB OETF: Encodes linear light for display.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
///
/// Monotonic increasing on [0, 1], with `oetf(0) = 0` and `oetf(1) = 1`.
///
/// # Example
///
/// ```rust
/// use tone_color::srgb::oetf;
///
/// let encoded = oetf(0.214);
/// assert!((encoded - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB EOTF: Decodes sRGB encoded values to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies the sRGB OETF to each channel of an RGB triplet.
#[inline]
pub fn oetf_rgb(rgb: Vec3) -> Vec3 {
    Vec3::new(oetf(rgb.x), oetf(rgb.y), oetf(rgb.z))
}

/// Quantizes a display-referred value to a byte.
///
/// Clamps to [0, 1] and truncates `x * 255.99` toward zero: an input of
/// exactly 1.0 yields 255, and quantization boundaries sit where the
/// original scheme put them (truncating, not rounding-to-nearest).
///
/// # Example
///
/// ```rust
/// use tone_color::srgb::quantize8;
///
/// assert_eq!(quantize8(0.0), 0);
/// assert_eq!(quantize8(1.0), 255);
/// assert_eq!(quantize8(2.0), 255);
/// ```
#[inline]
pub fn quantize8(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.99) as u8
}

/// Gamma-encodes and quantizes one linear channel.
///
/// Equivalent to `quantize8(oetf(l))` with the clamp happening after the
/// transfer function, matching the pipeline's encode-clamp-quantize order.
#[inline]
pub fn encode8(l: f32) -> u8 {
    quantize8(oetf(l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oetf_boundaries() {
        assert_eq!(oetf(0.0), 0.0);
        assert!((oetf(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_oetf_monotonic() {
        let mut prev = -1.0;
        for i in 0..=1000 {
            let v = oetf(i as f32 / 1000.0);
            assert!(v > prev, "oetf not monotonic at {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_eotf_roundtrip() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let back = oetf(eotf(v));
            assert!((v - back).abs() < 1e-5, "v={}, back={}", v, back);
        }
    }

    #[test]
    fn test_quantize_boundaries() {
        assert_eq!(quantize8(0.0), 0);
        assert_eq!(quantize8(1.0), 255);
        assert_eq!(quantize8(-0.5), 0);
        assert_eq!(quantize8(1.5), 255);
        // truncation, not rounding
        assert_eq!(quantize8(0.00391), 1);
        assert_eq!(quantize8(0.00390), 0);
    }

    #[test]
    fn test_encode8_midpoint() {
        // sRGB curve at 0.5 linear encodes to ~0.7354, which truncates to 188
        assert_eq!(encode8(0.5), 188);
    }
}
