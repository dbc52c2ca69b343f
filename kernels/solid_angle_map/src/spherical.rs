// Pixel-to-sphere coordinate mapping

use crate::types::{GridConfig, SphericalInterval};

// ============================================================================
// EQUIRECTANGULAR MAPPER
// ============================================================================

// Map a pixel (x, y) to the spherical angular interval it covers
//
// Geometry: row y is the latitude band centered at θ_mid = 180° * y / height,
// extending dθ/2 on either side; every column spans the same dφ of longitude.
//
// Note: x does not affect the result. In an equirectangular layout all
// columns of a given row cover congruent patches, so their solid angles are
// identical. This is intentional, not an omission.
pub fn pixel_to_spherical(config: &GridConfig, _x: u32, y: u32) -> SphericalInterval {
    let d_phi = config.d_phi();
    let d_theta = config.d_theta();
    let theta_mid = config.theta_mid(y);

    let theta1 = theta_mid - d_theta / 2.0;
    let theta2 = theta_mid + d_theta / 2.0;

    SphericalInterval::new(theta1, theta2, d_phi)
}

// Solid angle of the patch covered by pixel (x, y)
//
// Convenience composition of the mapper and the closed-form patch formula.
#[inline]
pub fn pixel_solid_angle(config: &GridConfig, x: u32, y: u32) -> f64 {
    pixel_to_spherical(config, x, y).solid_angle()
}
