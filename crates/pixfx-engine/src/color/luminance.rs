//! Perceived brightness (ITU-R BT.709 weights).

/// Weighted brightness `0.2126 r + 0.7152 g + 0.0722 b`.
///
/// Inputs are channel values on the 0..=255 scale (floats are accepted so
/// error-adjusted diffusion values can be measured too). The result is not
/// clamped.
///
/// The weights are applied as integers over 10 000 so that a gray input
/// `(v, v, v)` yields exactly `v`; threshold comparisons at the boundary
/// are then exact.
#[inline]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    (2126.0 * r + 7152.0 * g + 722.0 * b) / 10_000.0
}
