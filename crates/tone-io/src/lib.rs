//! # tone-io
//!
//! File I/O collaborators for the tonemapping pipeline.
//!
//! The pipeline itself never touches files; this crate adapts the two
//! formats at its edges:
//!
//! - [`hdr`] - reads Radiance HDR (RGBE) files into a linear-light
//!   [`tone_core::HdrImage`]
//! - [`png`] - writes the 8-bit output grid as an RGB PNG
//!
//! # Example
//!
//! ```rust,ignore
//! use tone_io::{hdr, png};
//!
//! let img = hdr::read("memorial.hdr")?;
//! let out = tone_ops::tonemap(&img, &tone_ops::Operator::AcesFitted)?;
//! png::write("out.png", &out)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod hdr;
pub mod png;

pub use error::{IoError, IoResult};
