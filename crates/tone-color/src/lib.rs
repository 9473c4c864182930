//! # tone-color
//!
//! The global tone curve catalog.
//!
//! Every function here is a pure mapping from one HDR color to one
//! display-referred color. Curves that depend on whole-image statistics
//! (the extended Reinhard variants) take the relevant scalar as a
//! parameter; nothing in this crate reads the pixel grid.
//!
//! # Modules
//!
//! - [`reinhard`] - the Reinhard compression family
//! - [`filmic`] - Uncharted2-style filmic shoulder curve
//! - [`aces`] - fitted and approximate ACES transforms
//! - [`response`] - measured sensor-response lookup
//! - [`srgb`] - gamma encoding and 8-bit quantization
//! - [`luma`] - luminance projection and rescaling
//!
//! # Example
//!
//! ```rust
//! use tone_color::reinhard;
//! use tone_math::Vec3;
//!
//! let hdr = Vec3::new(4.0, 1.0, 0.25);
//! let ldr = reinhard::reinhard(hdr);
//! assert!(ldr.max_element() < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aces;
mod error;
pub mod filmic;
pub mod luma;
pub mod reinhard;
pub mod response;
pub mod srgb;

pub use error::{ColorError, ColorResult};
pub use filmic::FilmicParams;
pub use response::ResponseTable;
