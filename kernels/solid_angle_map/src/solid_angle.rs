// Closed-form solid angle of a latitude-longitude patch

// ============================================================================
// PATCH SOLID ANGLE
// ============================================================================

// Solid angle of a spherical patch bounded by polar angles [θ1, θ2] and an
// azimuthal span dφ, in steradians
//
// Math: integrating the area element sin(θ) dθ dφ over the patch gives
//   Ω = ∫∫ sin(θ) dθ dφ = (cos(θ1) - cos(θ2)) * dφ
// This is exact for any patch on the unit sphere; no approximation involved.
//
// The result is negative when θ1 > θ2. Ordering the pair is the caller's
// responsibility; the equirectangular mapper always produces θ1 < θ2.
#[inline]
pub fn patch_solid_angle(theta1: f64, theta2: f64, d_phi: f64) -> f64 {
    (theta1.cos() - theta2.cos()) * d_phi
}
