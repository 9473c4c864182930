//! Measured sensor-response lookup.
//!
//! A [`ResponseTable`] emulates a camera sensor: incoming irradiance is
//! normalized against an ISO level and pushed through a measured
//! irradiance-to-intensity curve instead of an analytic one.
//!
//! # Format
//!
//! Tables load from a plain text file, one sample pair per line:
//!
//! ```text
//! # irradiance  intensity
//! 0.0  0.0
//! 0.25 0.31
//! 0.5  0.52
//! 1.0  1.0
//! ```
//!
//! Irradiance must be strictly increasing within [0, 1] and intensity must
//! stay within [0, 1]; anything else is rejected at load time.

use crate::{ColorError, ColorResult};
use std::io::BufRead;
use std::path::Path;
use tone_math::{inverse_lerp, lerp, Vec3};

/// A validated irradiance-to-intensity response curve.
///
/// # Example
///
/// ```rust
/// use tone_color::ResponseTable;
///
/// let table = ResponseTable::linear(64);
/// let mid = table.intensity_at(0.5, 1.0);
/// assert!((mid - 0.5).abs() < 0.02);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTable {
    /// Irradiance samples, strictly increasing in [0, 1]
    irradiance: Vec<f32>,
    /// Intensity samples in [0, 1], one per irradiance entry
    intensity: Vec<f32>,
}

impl ResponseTable {
    /// Creates a table from sample vectors, validating the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidTable`] when the sequences are empty,
    /// have different lengths, leave [0, 1], or irradiance is not strictly
    /// increasing.
    pub fn from_samples(irradiance: Vec<f32>, intensity: Vec<f32>) -> ColorResult<Self> {
        if irradiance.is_empty() {
            return Err(ColorError::InvalidTable("table must not be empty".into()));
        }
        if irradiance.len() != intensity.len() {
            return Err(ColorError::InvalidTable(format!(
                "sequence lengths differ: {} vs {}",
                irradiance.len(),
                intensity.len()
            )));
        }
        for pair in irradiance.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ColorError::InvalidTable(format!(
                    "irradiance not strictly increasing at {} -> {}",
                    pair[0], pair[1]
                )));
            }
        }
        for &v in irradiance.iter().chain(intensity.iter()) {
            if !(0.0..=1.0).contains(&v) {
                return Err(ColorError::InvalidTable(format!(
                    "sample {} outside [0, 1]",
                    v
                )));
            }
        }
        Ok(Self {
            irradiance,
            intensity,
        })
    }

    /// An identity response sampled at `size` points.
    ///
    /// Stands in when no measured table is supplied.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn linear(size: usize) -> Self {
        assert!(size >= 2, "linear table needs at least 2 samples");
        let samples: Vec<f32> = (0..size)
            .map(|i| i as f32 / (size - 1) as f32)
            .collect();
        Self {
            irradiance: samples.clone(),
            intensity: samples,
        }
    }

    /// Loads and validates a table from a two-column text file.
    pub fn load<P: AsRef<Path>>(path: P) -> ColorResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::parse(std::io::BufReader::new(file))
    }

    /// Parses a table from a reader, one `irradiance intensity` pair per
    /// line, with `#` comments and blank lines skipped.
    pub fn parse<R: BufRead>(reader: R) -> ColorResult<Self> {
        let mut irradiance = Vec::new();
        let mut intensity = Vec::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let irr = fields
                .next()
                .and_then(|f| f.parse::<f32>().ok())
                .ok_or_else(|| {
                    ColorError::ParseError(format!("line {}: expected irradiance", lineno + 1))
                })?;
            let inten = fields
                .next()
                .and_then(|f| f.parse::<f32>().ok())
                .ok_or_else(|| {
                    ColorError::ParseError(format!("line {}: expected intensity", lineno + 1))
                })?;
            if fields.next().is_some() {
                return Err(ColorError::ParseError(format!(
                    "line {}: expected exactly two columns",
                    lineno + 1
                )));
            }
            irradiance.push(irr);
            intensity.push(inten);
        }

        Self::from_samples(irradiance, intensity)
    }

    /// Number of samples in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.irradiance.len()
    }

    /// Always false: construction rejects empty tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.irradiance.is_empty()
    }

    /// Sensor intensity for one channel at the given ISO level.
    ///
    /// Clamps the input to `[0, iso]`, normalizes to [0, 1], binary-searches
    /// the irradiance sequence for the insertion point, and linearly
    /// interpolates intensity between the bracketing entries. A search that
    /// lands at or past the end of the table reads the missing upper bound
    /// as 1.0.
    pub fn intensity_at(&self, f: f32, iso: f32) -> f32 {
        let f = f.clamp(0.0, iso) / iso;

        // First index whose irradiance exceeds f
        let idx = self.irradiance.partition_point(|&v| v <= f);

        let get_or_one = |samples: &[f32], i: usize| samples.get(i).copied().unwrap_or(1.0);

        let low_irr = get_or_one(&self.irradiance, idx);
        let high_irr = get_or_one(&self.irradiance, idx + 1);
        let t = inverse_lerp(low_irr, high_irr, f);

        let low_val = get_or_one(&self.intensity, idx);
        let high_val = get_or_one(&self.intensity, idx + 1);

        lerp(low_val, high_val, t).clamp(0.0, 1.0)
    }

    /// Applies the response independently to each channel.
    pub fn apply(&self, c: Vec3, iso: f32) -> Vec3 {
        Vec3::new(
            self.intensity_at(c.x, iso),
            self.intensity_at(c.y, iso),
            self.intensity_at(c.z, iso),
        )
    }
}
