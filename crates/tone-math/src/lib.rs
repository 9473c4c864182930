//! # tone-math
//!
//! Math primitives for HDR tone reproduction.
//!
//! This crate provides the small set of numeric types the tonemapping
//! pipeline is built on:
//!
//! - [`Vec3`] - RGB color triplets with elementwise arithmetic
//! - [`Mat3`] - 3x3 matrices for fixed color transforms
//! - Interpolation utilities ([`lerp`], [`inverse_lerp`])
//!
//! # Design
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Tone curves divide colors by colors (`c / (1 + c)`), so [`Vec3`] supports
//! elementwise division and scalar-plus-vector forms directly.
//!
//! # Usage
//!
//! ```rust
//! use tone_math::Vec3;
//!
//! let hdr = Vec3::new(4.0, 1.0, 0.25);
//! let compressed = hdr / (1.0 + hdr);
//! assert!(compressed.max_element() < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod mat3;
mod vec3;

pub use interp::*;
pub use mat3::*;
pub use vec3::*;
