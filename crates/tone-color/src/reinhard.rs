//! The Reinhard tone compression family.
//!
//! All variants share the `x / (1 + x)` shape: unbounded input maps into
//! [0, 1), mid tones pass nearly linearly, highlights roll off. They
//! differ in what they compress (channels vs luminance) and whether a
//! known maximum white is burned in to reach exactly 1.0.

use crate::luma::{change_luminance, luminance, LUMA_WEIGHTS};
use tone_math::Vec3;

// ============================================================================
// Per-channel variants
// ============================================================================

/// Simple Reinhard: `c / (1 + c)`, per channel.
///
/// Output is always in [0, 1) for non-negative input; pure white is
/// approached but never reached.
#[inline]
pub fn reinhard(c: Vec3) -> Vec3 {
    c / (1.0 + c)
}

/// Extended Reinhard with a configurable white point.
///
/// `c * (1 + c / max_white^2) / (1 + c)`, per channel. Inputs at
/// `max_white` map to exactly 1.0, so the brightest value in the image can
/// be pinned to full white instead of saturating asymptotically.
#[inline]
pub fn reinhard_extended(c: Vec3, max_white: f32) -> Vec3 {
    let numerator = c * (1.0 + c / Vec3::splat(max_white * max_white));
    numerator / (1.0 + c)
}

/// Reinhard-Jodie: per-channel Reinhard blended against luminance Reinhard.
///
/// Uses the per-channel result itself as the interpolation weight, which
/// keeps bright colors from desaturating as hard as plain per-channel
/// Reinhard does.
#[inline]
pub fn reinhard_jodie(c: Vec3) -> Vec3 {
    let l = luminance(c);
    let tc = c / (1.0 + c);
    (c / (1.0 + l)).lerp3(tc, tc)
}

// ============================================================================
// Luminance-domain variants
// ============================================================================

/// Extended Reinhard applied to luminance only.
///
/// Compresses the luminance scalar with the extended curve, then rescales
/// the color to the new luminance, preserving chromaticity.
#[inline]
pub fn reinhard_extended_luminance(c: Vec3, max_white_l: f32) -> Vec3 {
    let l_old = luminance(c);
    let numerator = l_old * (1.0 + (l_old / (max_white_l * max_white_l)));
    let l_new = numerator / (1.0 + l_old);
    change_luminance(c, l_new)
}

/// Chromaticity-preserving Reinhard.
///
/// Divides by `1 + luminance` (so overall luminance follows the Reinhard
/// curve), then redistributes any per-channel excess above 1.0 into the
/// other two channels through the luminance-weight mixing vector
/// `w / (1 - w)`. Keeps the compressed color displayable without the
/// luminance shift independent per-channel clipping would cause.
///
/// The denominator `1 + dot(c, w)` is at least 1 for non-negative input,
/// so black maps to black with no division hazard.
#[inline]
pub fn reinhard_chroma(c: Vec3) -> Vec3 {
    let nv = LUMA_WEIGHTS / (1.0 - LUMA_WEIGHTS);
    let c = c / (1.0 + c.dot(LUMA_WEIGHTS));
    let nc = (c - 1.0).max(Vec3::ZERO) * nv;
    c + Vec3::new(nc.y + nc.z, nc.x + nc.z, nc.x + nc.y)
}
