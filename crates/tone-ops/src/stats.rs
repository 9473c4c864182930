//! Whole-image luminance statistics.
//!
//! One full pass over the pixel grid produces three scalars the
//! statistics-dependent curves read: the maximum luminance, the maximum
//! single channel value, and the log-average luminance. The reduction is
//! associative and commutative over pixels, so the parallel and
//! sequential paths agree on the maxima exactly and on the log-average up
//! to floating-point summation order.

use tone_core::pixel::luminance_rec709;
use tone_core::HdrImage;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Epsilon added before the logarithm so black pixels contribute
/// `ln(1e-4)` instead of negative infinity.
pub const LOG_LUMINANCE_EPS: f32 = 1e-4;

/// Global scalars derived from one pass over the pixel grid.
///
/// Computed once and frozen before any operator runs; the extended
/// Reinhard curves read [`max_component`](Self::max_component) and
/// [`max_luminance`](Self::max_luminance) as their white points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalStats {
    /// Largest luminance of any pixel.
    pub max_luminance: f32,
    /// Largest single channel value across all pixels.
    pub max_component: f32,
    /// `exp(mean(ln(eps + luminance)))` over all pixels.
    pub log_average_luminance: f32,
}

/// Computes statistics with a single sequential scan.
pub fn compute(img: &HdrImage) -> GlobalStats {
    let mut max_luminance = 0.0f32;
    let mut max_component = 0.0f32;
    let mut log_sum = 0.0f64;

    for rgb in img.pixels() {
        let l = luminance_rec709(rgb);
        max_luminance = max_luminance.max(l);
        max_component = max_component.max(rgb[0]).max(rgb[1]).max(rgb[2]);
        log_sum += f64::from(LOG_LUMINANCE_EPS + l).ln();
    }

    finish(max_luminance, max_component, log_sum, img.pixel_count())
}

/// Computes statistics with a rayon tree-reduction.
///
/// Maxima are identical to the sequential scan; the log-average matches
/// within summation-order tolerance.
#[cfg(feature = "parallel")]
pub fn compute_par(img: &HdrImage) -> GlobalStats {
    let (max_luminance, max_component, log_sum) = img
        .data()
        .par_chunks_exact(3)
        .map(|c| {
            let rgb = [c[0], c[1], c[2]];
            let l = luminance_rec709(rgb);
            (
                l,
                rgb[0].max(rgb[1]).max(rgb[2]),
                f64::from(LOG_LUMINANCE_EPS + l).ln(),
            )
        })
        .reduce(
            || (0.0f32, 0.0f32, 0.0f64),
            |a, b| (a.0.max(b.0), a.1.max(b.1), a.2 + b.2),
        );

    finish(max_luminance, max_component, log_sum, img.pixel_count())
}

fn finish(max_luminance: f32, max_component: f32, log_sum: f64, count: usize) -> GlobalStats {
    GlobalStats {
        max_luminance,
        max_component,
        log_average_luminance: (log_sum / count as f64).exp() as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform(width: u32, height: u32, rgb: [f32; 3]) -> HdrImage {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        HdrImage::from_data(width, height, data).unwrap()
    }

    #[test]
    fn test_all_black_statistics() {
        let img = uniform(2, 2, [0.0, 0.0, 0.0]);
        let s = compute(&img);
        assert_eq!(s.max_luminance, 0.0);
        assert_eq!(s.max_component, 0.0);
        // the epsilon floor survives the log round-trip
        assert_relative_eq!(s.log_average_luminance, 1e-4, epsilon = 1e-8);
    }

    #[test]
    fn test_uniform_log_average_matches_luminance() {
        let img = uniform(8, 8, [0.18, 0.18, 0.18]);
        let s = compute(&img);
        assert_relative_eq!(s.log_average_luminance, 0.18, epsilon = 1e-3);
    }

    #[test]
    fn test_maxima_track_brightest_pixel() {
        let mut data = vec![0.1f32; 3 * 4];
        data[6] = 5.0; // lone bright red channel
        let img = HdrImage::from_data(2, 2, data).unwrap();
        let s = compute(&img);
        assert_eq!(s.max_component, 5.0);
        assert_relative_eq!(
            s.max_luminance,
            luminance_rec709([5.0, 0.1, 0.1]),
            epsilon = 1e-6
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_agrees_with_sequential() {
        let mut data = Vec::new();
        for i in 0..(32 * 32 * 3) {
            data.push((i % 97) as f32 * 0.05);
        }
        let img = HdrImage::from_data(32, 32, data).unwrap();
        let a = compute(&img);
        let b = compute_par(&img);
        assert_eq!(a.max_luminance, b.max_luminance);
        assert_eq!(a.max_component, b.max_component);
        assert_relative_eq!(
            a.log_average_luminance,
            b.log_average_luminance,
            epsilon = 1e-5
        );
    }
}
