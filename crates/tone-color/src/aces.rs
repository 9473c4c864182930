//! ACES filmic color rendering transforms.
//!
//! Two renditions of the ACES look:
//!
//! - [`aces_fitted`] - Stephen Hill's fit: input matrix, rational RRT+ODT
//!   fit, output matrix
//! - [`aces_approx`] - Krzysztof Narkowicz's cheaper luminance-only fit
//!
//! The matrices and curve constants are fixed data; nothing is derived at
//! runtime.

use tone_math::{Mat3, Vec3};

// ============================================================================
// Fixed transform matrices
// ============================================================================

/// sRGB to ACES rendering space input transform.
pub const ACES_INPUT: Mat3 = Mat3::from_rows([
    [0.59719, 0.35458, 0.04823],
    [0.07600, 0.90834, 0.01566],
    [0.02840, 0.13383, 0.83777],
]);

/// ACES rendering space back to sRGB output transform.
pub const ACES_OUTPUT: Mat3 = Mat3::from_rows([
    [1.60475, -0.53108, -0.07367],
    [-0.10208, 1.10813, -0.00605],
    [-0.00327, -0.07276, 1.07602],
]);

// ============================================================================
// Curves
// ============================================================================

/// Combined RRT and ODT rational fit, per channel.
///
/// # Formula
///
/// ```text
/// (x^2 + 0.0245786*x - 0.000090537) / (0.983729*x^2 + 0.4329510*x + 0.238081)
/// ```
#[inline]
pub fn rrt_odt_fit(v: Vec3) -> Vec3 {
    let a = v * (v + 0.0245786) - 0.000090537;
    let b = v * (v * 0.983729 + 0.4329510) + 0.238081;
    a / b
}

/// Fitted ACES transform: input matrix, rational fit, output matrix.
#[inline]
pub fn aces_fitted(v: Vec3) -> Vec3 {
    ACES_OUTPUT * rrt_odt_fit(ACES_INPUT * v)
}

/// Approximate ACES: 0.6 prescale, rational fit, clamp to [0, 1].
///
/// # Formula
///
/// ```text
/// x = 0.6 * v
/// (x*(2.51*x + 0.03)) / (x*(2.43*x + 0.59) + 0.14)
/// ```
#[inline]
pub fn aces_approx(v: Vec3) -> Vec3 {
    let v = v * 0.6;
    let a = 2.51;
    let b = 0.03;
    let c = 2.43;
    let d = 0.59;
    let e = 0.14;
    ((v * (v * a + b)) / (v * (v * c + d) + e)).clamp01()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrices_preserve_gray_axis() {
        // Both matrices have rows summing to 1, so achromatic input stays
        // achromatic through the matrix pair
        let v = Vec3::splat(0.42);
        let back = ACES_OUTPUT * (ACES_INPUT * v);
        assert!((back.x - v.x).abs() < 1e-4);
        assert!((back.y - v.y).abs() < 1e-4);
        assert!((back.z - v.z).abs() < 1e-4);
    }

    #[test]
    fn test_fitted_black_near_zero() {
        let out = aces_fitted(Vec3::ZERO);
        assert!(out.abs().max_element() < 0.01);
    }

    #[test]
    fn test_fitted_bright_approaches_white() {
        let out = aces_fitted(Vec3::splat(20.0));
        assert!(out.min_element() > 0.95);
    }

    #[test]
    fn test_approx_range() {
        for mag in [0.0, 0.18, 1.0, 4.0, 100.0] {
            let out = aces_approx(Vec3::splat(mag));
            assert!(out.min_element() >= 0.0 && out.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_fitted_and_approx_agree_at_mid_gray() {
        let g = Vec3::splat(0.18);
        let fitted = aces_fitted(g);
        let approx = aces_approx(g);
        let diff = (fitted - approx).abs();
        assert!(diff.max_element() < 0.05, "diff = {:?}", diff);
    }

    #[test]
    fn test_approx_monotonic_on_gray_axis() {
        let mut prev = f32::NEG_INFINITY;
        for i in 0..100 {
            let y = aces_approx(Vec3::splat(i as f32 * 0.1)).x;
            assert!(y >= prev);
            prev = y;
        }
    }
}
