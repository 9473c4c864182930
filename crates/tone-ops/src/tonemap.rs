//! The tonemap pipeline: operator dispatch, map pass, quantization.
//!
//! The operator family is closed and small, so selection is a tagged
//! enum with one dispatch function rather than trait objects. Each
//! pixel's computation is independent and read-only over the shared
//! source grid, which makes the map pass safe to shard by output row
//! with no locking.
//!
//! # Example
//!
//! ```rust
//! use tone_core::HdrImage;
//! use tone_ops::{tonemap, Operator};
//!
//! let img = HdrImage::from_data(2, 1, vec![0.5; 6]).unwrap();
//! let out = tonemap(&img, &Operator::AcesFitted).unwrap();
//! assert_eq!(out.width(), 2);
//! ```

use crate::local::{self, LocalParams};
use crate::stats::{self, GlobalStats};
use crate::OpsResult;
use tone_color::{aces, filmic, reinhard, srgb, FilmicParams, ResponseTable};
use tone_core::{HdrImage, LdrImage};
use tone_math::Vec3;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The tone reproduction operator applied to every pixel.
///
/// Statistics-dependent variants carry an optional override; `None`
/// reads the corresponding scalar from the frozen [`GlobalStats`] at
/// dispatch time.
#[derive(Debug, Clone)]
pub enum Operator {
    /// Clamp channels to [0, 1] with no compression (baseline).
    Clamp,
    /// Simple per-channel Reinhard `c / (1 + c)`.
    Reinhard,
    /// Extended Reinhard; white point defaults to the image's maximum
    /// channel value.
    ReinhardExtended {
        /// White point override; `None` uses `GlobalStats::max_component`.
        max_white: Option<f32>,
    },
    /// Luminance-only extended Reinhard; white point defaults to the
    /// image's maximum luminance.
    ReinhardExtendedLuminance {
        /// White point override; `None` uses `GlobalStats::max_luminance`.
        max_white: Option<f32>,
    },
    /// Reinhard-Jodie blend.
    ReinhardJodie,
    /// Chromaticity-preserving Reinhard.
    ReinhardChroma,
    /// Uncharted2-style filmic curve.
    Filmic(FilmicParams),
    /// Fitted ACES (matrix / rational fit / matrix).
    AcesFitted,
    /// Approximate ACES.
    AcesApprox,
    /// Measured sensor response at an ISO level.
    Sensor {
        /// Validated response table.
        table: ResponseTable,
        /// ISO level the input range is normalized against.
        iso: f32,
    },
    /// Spatially adaptive local operator.
    Local(LocalParams),
}

impl Operator {
    /// Short operator name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Clamp => "clamp",
            Operator::Reinhard => "reinhard",
            Operator::ReinhardExtended { .. } => "reinhard-extended",
            Operator::ReinhardExtendedLuminance { .. } => "reinhard-extended-luminance",
            Operator::ReinhardJodie => "reinhard-jodie",
            Operator::ReinhardChroma => "reinhard-chroma",
            Operator::Filmic(_) => "filmic",
            Operator::AcesFitted => "aces-fitted",
            Operator::AcesApprox => "aces-approx",
            Operator::Sensor { .. } => "sensor",
            Operator::Local(_) => "local",
        }
    }

    /// Applies the operator to one pixel.
    ///
    /// `stats` must be the frozen statistics of `img`; the local operator
    /// additionally reads neighborhoods of (x, y) from the grid.
    pub fn apply(&self, img: &HdrImage, stats: &GlobalStats, x: u32, y: u32, v: Vec3) -> Vec3 {
        match self {
            Operator::Clamp => v.clamp01(),
            Operator::Reinhard => reinhard::reinhard(v),
            Operator::ReinhardExtended { max_white } => {
                reinhard::reinhard_extended(v, max_white.unwrap_or(stats.max_component))
            }
            Operator::ReinhardExtendedLuminance { max_white } => {
                reinhard::reinhard_extended_luminance(v, max_white.unwrap_or(stats.max_luminance))
            }
            Operator::ReinhardJodie => reinhard::reinhard_jodie(v),
            Operator::ReinhardChroma => reinhard::reinhard_chroma(v),
            Operator::Filmic(p) => filmic::filmic(v, p),
            Operator::AcesFitted => aces::aces_fitted(v),
            Operator::AcesApprox => aces::aces_approx(v),
            Operator::Sensor { table, iso } => table.apply(v, *iso),
            Operator::Local(p) => local::reinhard_local(img, p, x, y, v),
        }
    }
}

/// Tonemaps an HDR image to 8-bit output.
///
/// Phase 1 computes [`GlobalStats`] over the whole grid; phase 2 maps
/// every pixel through the operator, gamma-encodes, clamps, and
/// quantizes. The statistics pass always completes before the map pass
/// begins.
///
/// # Errors
///
/// Returns [`crate::OpsError::InvalidParameter`] when a local operator
/// carries invalid parameters.
pub fn tonemap(img: &HdrImage, op: &Operator) -> OpsResult<LdrImage> {
    #[cfg(feature = "parallel")]
    let s = stats::compute_par(img);
    #[cfg(not(feature = "parallel"))]
    let s = stats::compute(img);

    debug!(
        max_luminance = s.max_luminance,
        max_component = s.max_component,
        log_average_luminance = s.log_average_luminance,
        "computed global statistics"
    );

    tonemap_with_stats(img, &s, op)
}

/// Tonemaps with statistics the caller already computed.
///
/// `stats` must come from a full pass over `img`; passing statistics of a
/// different image gives stats-dependent operators the wrong white
/// points.
pub fn tonemap_with_stats(
    img: &HdrImage,
    stats: &GlobalStats,
    op: &Operator,
) -> OpsResult<LdrImage> {
    if let Operator::Local(params) = op {
        params.validate()?;
    }

    let width = img.width();
    let height = img.height();
    debug!(operator = op.name(), width, height, "tonemapping");

    let stride = width as usize * 3;
    let mut data = vec![0u8; stride * height as usize];

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| map_row(img, stats, op, y as u32, row));

    #[cfg(not(feature = "parallel"))]
    for (y, row) in data.chunks_mut(stride).enumerate() {
        map_row(img, stats, op, y as u32, row);
    }

    Ok(LdrImage::from_data(width, height, data)?)
}

/// Maps one output row; rows are disjoint, so workers never share cells.
fn map_row(img: &HdrImage, stats: &GlobalStats, op: &Operator, y: u32, row: &mut [u8]) {
    for x in 0..img.width() {
        let v = Vec3::from_array(img.pixel(x, y));
        let mapped = op.apply(img, stats, x, y, v);
        let i = x as usize * 3;
        row[i] = srgb::encode8(mapped.x);
        row[i + 1] = srgb::encode8(mapped.y);
        row[i + 2] = srgb::encode8(mapped.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, value: f32) -> HdrImage {
        HdrImage::from_data(
            width,
            height,
            vec![value; width as usize * height as usize * 3],
        )
        .unwrap()
    }

    #[test]
    fn test_reinhard_unit_pixel() {
        // (1,1,1) compresses to 0.5, encodes to byte 188
        let img = uniform(1, 1, 1.0);
        let out = tonemap(&img, &Operator::Reinhard).unwrap();
        assert_eq!(out.pixel(0, 0), [188, 188, 188]);
    }

    #[test]
    fn test_black_image_stays_black() {
        let img = uniform(2, 2, 0.0);
        for op in [
            Operator::Clamp,
            Operator::Reinhard,
            Operator::ReinhardExtended { max_white: Some(4.0) },
            Operator::ReinhardJodie,
            Operator::ReinhardChroma,
            Operator::AcesApprox,
            Operator::Local(LocalParams::default()),
        ] {
            let out = tonemap(&img, &op).unwrap();
            assert_eq!(out.as_bytes(), &[0u8; 12], "operator {}", op.name());
        }
    }

    #[test]
    fn test_extended_defaults_to_image_maximum() {
        // brightest pixel pinned to full white when the stats supply the
        // white point
        let mut data = vec![0.25f32; 2 * 2 * 3];
        data[0] = 6.0;
        data[1] = 6.0;
        data[2] = 6.0;
        let img = HdrImage::from_data(2, 2, data).unwrap();
        let out = tonemap(&img, &Operator::ReinhardExtended { max_white: None }).unwrap();
        assert_eq!(out.pixel(0, 0), [255, 255, 255]);
    }

    #[test]
    fn test_local_rejects_invalid_params() {
        let img = uniform(2, 2, 0.5);
        let mut params = LocalParams::default();
        params.max_scale = 0.5;
        assert!(tonemap(&img, &Operator::Local(params)).is_err());
    }

    #[test]
    fn test_flat_local_interior_is_uniform() {
        let img = uniform(4, 4, 0.18);
        let out = tonemap(&img, &Operator::Local(LocalParams::default())).unwrap();
        // interior pixels all agree
        assert_eq!(out.pixel(1, 1), out.pixel(2, 1));
        assert_eq!(out.pixel(1, 1), out.pixel(1, 2));
        assert_eq!(out.pixel(1, 1), out.pixel(2, 2));
    }

    #[test]
    fn test_clamp_passthrough() {
        let img = uniform(1, 1, 0.5);
        let out = tonemap(&img, &Operator::Clamp).unwrap();
        assert_eq!(out.pixel(0, 0), [188, 188, 188]);
    }

    #[test]
    fn test_sensor_operator() {
        let img = uniform(1, 1, 3.0);
        let op = Operator::Sensor {
            table: ResponseTable::linear(1024),
            iso: 6.0,
        };
        let out = tonemap(&img, &op).unwrap();
        // 3.0 at ISO 6 normalizes to 0.5 and the identity table keeps it
        assert_eq!(out.pixel(0, 0), [188, 188, 188]);
    }
}
