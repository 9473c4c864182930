//! Spatially adaptive local tone reproduction.
//!
//! Models local contrast adaptation with a difference of two
//! Gaussian-weighted neighborhood luminance averages - a narrow "center"
//! and a wider "surround" - following Reinhard's photoreceptor-based
//! local operator.
//!
//! Per pixel, the operator searches outward through doubling scales for
//! the first scale where the center-surround response falls below a
//! threshold, then divides the color by `1 + v1` at that scale. Samples
//! falling outside the grid are skipped and the kernel is *not*
//! renormalized, so the neighborhood averages darken toward the image
//! borders and border pixels come out slightly different from interior
//! ones; this is part of the operator's defined behavior, not an
//! artifact to correct.
//!
//! Evaluating one scale costs `O((alpha * s)^2)` samples per pixel and
//! the search may try every scale, so this operator is expensive by
//! construction.

use std::f64::consts::{PI, SQRT_2};

use crate::{OpsError, OpsResult};
use tone_core::pixel::luminance_rec709;
use tone_core::HdrImage;
use tone_math::Vec3;

/// Parameters of the local adaptation operator.
///
/// All values must be positive and `max_scale` must exceed 1. By
/// convention `alpha_2 = 1.6 * alpha_1` (surround radius 1.6x the center
/// radius); the relation is not enforced, callers maintain it.
///
/// The defaults are the tuning of the reference renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalParams {
    /// Center kernel radius factor.
    pub alpha_1: f64,
    /// Surround kernel radius factor, conventionally `1.6 * alpha_1`.
    pub alpha_2: f64,
    /// Center-surround response magnitude below which a scale is accepted.
    pub threshold: f64,
    /// Sharpening exponent in the response denominator.
    pub phi: f64,
    /// Key value for the adaptation level.
    pub middle_grey: f64,
    /// Largest scale the search may return; must be > 1.
    pub max_scale: f64,
}

impl Default for LocalParams {
    fn default() -> Self {
        let alpha_1 = 0.354;
        Self {
            alpha_1,
            alpha_2: 1.6 * alpha_1,
            threshold: 0.05,
            phi: 8.0,
            middle_grey: 0.5,
            max_scale: 64.0,
        }
    }
}

impl LocalParams {
    /// Validates the positivity and scale invariants.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] when any parameter is not a
    /// positive finite number or `max_scale <= 1`.
    pub fn validate(&self) -> OpsResult<()> {
        let fields = [
            ("alpha_1", self.alpha_1),
            ("alpha_2", self.alpha_2),
            ("threshold", self.threshold),
            ("phi", self.phi),
            ("middle_grey", self.middle_grey),
            ("max_scale", self.max_scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(OpsError::InvalidParameter(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if self.max_scale <= 1.0 {
            return Err(OpsError::InvalidParameter(format!(
                "max_scale must be > 1, got {}",
                self.max_scale
            )));
        }
        Ok(())
    }
}

/// Unnormalized 2D Gaussian kernel weight.
///
/// # Formula
///
/// ```text
/// exp(-(dx^2 + dy^2) / (alpha*s)^2) / (pi * (alpha*s)^2)
/// ```
#[inline]
pub fn gaussian_weight(dx: f64, dy: f64, alpha: f64, s: f64) -> f64 {
    let alpha_s_sq = (alpha * s) * (alpha * s);
    (-(dx * dx + dy * dy) / alpha_s_sq).exp() / (PI * alpha_s_sq)
}

/// Gaussian-weighted neighborhood luminance around (px, py).
///
/// Sums kernel-weighted luminance over a square window of half-width
/// `round(3 * alpha * s / sqrt(2))` - the 3-sigma support of the kernel
/// (`sigma = alpha * s / sqrt(2)`); weight beyond that radius is
/// negligible. Off-grid samples contribute zero and the kernel is not
/// renormalized for the truncation.
pub fn weighted_luminance(img: &HdrImage, px: u32, py: u32, alpha: f64, s: f64) -> f64 {
    let half = (3.0 * alpha * s / SQRT_2).round() as i64;

    let mut accum = 0.0f64;
    for dx in -half..=half {
        for dy in -half..=half {
            let Some(rgb) = img.sample(px as i64 + dx, py as i64 + dy) else {
                continue;
            };
            let w = gaussian_weight(dx as f64, dy as f64, alpha, s);
            accum += w * f64::from(luminance_rec709(rgb));
        }
    }
    accum
}

/// Center-surround response at scale `s`.
///
/// # Formula
///
/// ```text
/// (v1 - v2) / (2^phi * middle_grey / s^2 + v1)
/// ```
///
/// where `v1` uses `alpha_1` (center) and `v2` uses the wider `alpha_2`
/// (surround). The magnitude indicates how much contrast activity the
/// neighborhood has at this scale.
pub fn contrast_response(img: &HdrImage, params: &LocalParams, px: u32, py: u32, s: f64) -> f64 {
    let v1 = weighted_luminance(img, px, py, params.alpha_1, s);
    let v2 = weighted_luminance(img, px, py, params.alpha_2, s);
    let denom = 2.0f64.powf(params.phi) * params.middle_grey / (s * s) + v1;
    (v1 - v2) / denom
}

/// Selects the adaptation scale for (px, py).
///
/// Doubles the scale from 1 while it stays below `max_scale`, returning
/// the first scale whose response magnitude falls under the threshold;
/// when none qualifies, returns `max_scale`. Terminates within
/// `ceil(log2(max_scale)) + 1` evaluations and the result is always in
/// `[1, max_scale]`.
pub fn select_scale(img: &HdrImage, params: &LocalParams, px: u32, py: u32) -> f64 {
    let mut scale = 1.0;
    while scale < params.max_scale {
        if contrast_response(img, params, px, py, scale).abs() < params.threshold {
            return scale;
        }
        scale *= 2.0;
    }
    params.max_scale
}

/// Local Reinhard compression of one pixel.
///
/// Divides the color uniformly by `1 + v1` at the selected scale - the
/// same as scaling luminance by `1 / (1 + v1)` while preserving channel
/// ratios exactly.
pub fn reinhard_local(img: &HdrImage, params: &LocalParams, px: u32, py: u32, c: Vec3) -> Vec3 {
    let scale = select_scale(img, params, px, py);
    let denominator = 1.0 + weighted_luminance(img, px, py, params.alpha_1, scale);
    c / denominator as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform(width: u32, height: u32, value: f32) -> HdrImage {
        HdrImage::from_data(
            width,
            height,
            vec![value; width as usize * height as usize * 3],
        )
        .unwrap()
    }

    #[test]
    fn test_default_params_valid() {
        LocalParams::default().validate().unwrap();
        assert_relative_eq!(
            LocalParams::default().alpha_2,
            1.6 * LocalParams::default().alpha_1,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let mut p = LocalParams::default();
        p.threshold = 0.0;
        assert!(p.validate().is_err());

        let mut p = LocalParams::default();
        p.max_scale = 1.0;
        assert!(p.validate().is_err());

        let mut p = LocalParams::default();
        p.alpha_1 = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_gaussian_peak_at_center() {
        let w0 = gaussian_weight(0.0, 0.0, 0.354, 1.0);
        let w1 = gaussian_weight(1.0, 0.0, 0.354, 1.0);
        assert!(w0 > w1);
        assert!(w1 >= 0.0);
    }

    #[test]
    fn test_uniform_image_selects_scale_one() {
        // constant luminance -> v1 == v2 at every scale -> response 0
        let img = uniform(16, 16, 0.18);
        let params = LocalParams::default();
        let s = select_scale(&img, &params, 8, 8);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_select_scale_bounds() {
        // a hard step edge keeps the response large at small scales
        let mut data = vec![0.0f32; 16 * 16 * 3];
        for y in 0..16usize {
            for x in 8..16usize {
                let i = (y * 16 + x) * 3;
                data[i] = 20.0;
                data[i + 1] = 20.0;
                data[i + 2] = 20.0;
            }
        }
        let img = HdrImage::from_data(16, 16, data).unwrap();
        let mut params = LocalParams::default();
        params.max_scale = 8.0;
        for (x, y) in [(0u32, 0u32), (7, 8), (15, 15)] {
            let s = select_scale(&img, &params, x, y);
            assert!((1.0..=params.max_scale).contains(&s), "scale {} at ({},{})", s, x, y);
        }
    }

    #[test]
    fn test_interior_compression_is_uniform() {
        let img = uniform(9, 9, 0.18);
        let params = LocalParams::default();
        let c = Vec3::splat(0.18);
        let center = reinhard_local(&img, &params, 4, 4, c);
        let off = reinhard_local(&img, &params, 5, 4, c);
        assert_relative_eq!(center.x, off.x, epsilon = 1e-6);
    }

    #[test]
    fn test_border_darker_than_interior() {
        // kernel truncation at the border loses surround weight, so the
        // border result must measurably differ from the interior
        let img = uniform(9, 9, 0.5);
        let params = LocalParams::default();
        let c = Vec3::splat(0.5);
        let interior = reinhard_local(&img, &params, 4, 4, c);
        let corner = reinhard_local(&img, &params, 0, 0, c);
        assert!(
            corner.x > interior.x,
            "corner keeps more light: truncated kernel sums less luminance"
        );
        assert!((corner.x - interior.x).abs() > 1e-6);
    }
}
