//! # tone-ops
//!
//! The tonemapping pipeline: whole-image statistics, the spatially
//! adaptive local operator, and the per-pixel map pass that ties the
//! curve catalog together.
//!
//! # Two phases
//!
//! 1. **Statistics** ([`stats`]) - one reduction pass over every pixel,
//!    producing the frozen [`GlobalStats`] the extended Reinhard curves
//!    read.
//! 2. **Map** ([`tonemap()`]) - one operator invocation per pixel, then
//!    gamma encoding and 8-bit quantization. Pixels are independent, so
//!    the pass shards by row across workers when the `parallel` feature
//!    (default) is enabled.
//!
//! The statistics phase always completes before the map phase starts.
//!
//! # Example
//!
//! ```rust
//! use tone_core::HdrImage;
//! use tone_ops::{tonemap, Operator};
//!
//! let img = HdrImage::from_data(1, 1, vec![1.0, 1.0, 1.0]).unwrap();
//! let out = tonemap(&img, &Operator::Reinhard).unwrap();
//! assert_eq!(out.pixel(0, 0), [188, 188, 188]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod local;
pub mod stats;
pub mod tonemap;

pub use error::{OpsError, OpsResult};
pub use local::LocalParams;
pub use stats::GlobalStats;
pub use tonemap::{tonemap, tonemap_with_stats, Operator};
