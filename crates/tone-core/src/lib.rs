//! # tone-core
//!
//! Core types for HDR tonemapping.
//!
//! This crate provides the foundational types used throughout the TONE-RS
//! workspace:
//!
//! - [`HdrImage`] - immutable linear-light RGB pixel grid (f32 per channel)
//! - [`LdrImage`] - display-referred 8-bit RGB output grid
//! - [`luminance_rec709`] - perceptual luminance weighting
//! - [`Error`], [`Result`] - unified error handling
//!
//! # Data Model
//!
//! An [`HdrImage`] is loaded once, never mutated, and read by every phase of
//! the pipeline: the statistics reduction reads all pixels, the map pass
//! reads one pixel (plus neighborhoods for the local operator). The
//! [`LdrImage`] is allocated empty and each cell written exactly once.
//!
//! # Memory Layout
//!
//! Both grids store pixels in **row-major** order, top-to-bottom,
//! channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::{HdrImage, LdrImage};
pub use pixel::{luminance_rec709, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};
