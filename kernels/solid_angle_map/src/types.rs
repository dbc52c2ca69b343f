// Type definitions for the solid angle map kernel

use std::f64::consts::PI;

// ============================================================================
// GRID CONFIGURATION
// ============================================================================

// Discretization of the sphere into an equirectangular pixel grid
//
// Geometry: rows are uniform latitude bands covering [0°, 180°] and columns
// are uniform longitude bands covering [0°, 360°). A width x height grid
// therefore tiles the whole sphere with width*height rectangular patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    // Image width in pixels (number of longitude bands)
    pub width: u32,

    // Image height in pixels (number of latitude bands)
    pub height: u32,
}

impl GridConfig {
    // Create a new grid configuration
    //
    // The original visualization had no dimension guard and would divide by
    // zero on a degenerate grid; here zero dimensions are a hard precondition
    // violation, rejected before any computation.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0, "Grid width must be positive");
        assert!(height > 0, "Grid height must be positive");
        Self { width, height }
    }

    // Get total number of pixels in the grid
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    // Longitude span of one column in radians
    //
    // Math: dφ = (360° / width) converted to radians.
    // Constant across the whole grid: longitude cells are uniform.
    #[inline]
    pub fn d_phi(&self) -> f64 {
        (360.0 / self.width as f64).to_radians()
    }

    // Latitude span of one row in radians
    //
    // Math: dθ = (180° / height) converted to radians.
    // Constant across the whole grid: latitude bands are uniform.
    #[inline]
    pub fn d_theta(&self) -> f64 {
        (180.0 / self.height as f64).to_radians()
    }

    // Latitude center of row y in radians
    //
    // Math: θ_mid = (180° * y / height) converted to radians.
    // Increases monotonically with y from 0 toward (just under) π.
    #[inline]
    pub fn theta_mid(&self, y: u32) -> f64 {
        (180.0 * y as f64 / self.height as f64).to_radians()
    }
}

impl Default for GridConfig {
    // Reference resolution from the original visualization
    fn default() -> Self {
        Self::new(128, 64)
    }
}

// ============================================================================
// SPHERICAL INTERVAL
// ============================================================================

// The angular patch one pixel covers on the unit sphere
//
// All angles are in radians. The mapper always produces theta1 < theta2 for
// a positive grid height, so the patch is non-degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalInterval {
    // Lower polar angle bound of the patch
    pub theta1: f64,

    // Upper polar angle bound of the patch
    pub theta2: f64,

    // Azimuthal (longitude) span of the patch
    pub d_phi: f64,
}

impl SphericalInterval {
    pub fn new(theta1: f64, theta2: f64, d_phi: f64) -> Self {
        Self { theta1, theta2, d_phi }
    }

    // Exact solid angle of this patch in steradians
    #[inline]
    pub fn solid_angle(&self) -> f64 {
        crate::solid_angle::patch_solid_angle(self.theta1, self.theta2, self.d_phi)
    }
}

// Total solid angle of the full sphere in steradians
pub const FULL_SPHERE_SR: f64 = 4.0 * PI;
