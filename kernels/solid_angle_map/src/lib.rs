// kernels/solid_angle_map/src/lib.rs

// Equirectangular Solid Angle Map Core
//
// This library computes the solid angle subtended by each cell of a
// latitude-longitude pixel grid on the unit sphere, normalizes the values
// into [0, 1], and writes them as grayscale intensities into an image sink.
// All computations use f64.
//
// Data flows one way: pixel coordinate → spherical interval → solid angle
// → raw grid → normalized grid → display collaborator.

pub mod render;
pub mod solid_angle;
pub mod spherical;
pub mod types;

pub use render::{
    compute_raw_grid, render_map, render_map_into, Extrema, GrayscaleImage, ImageSink,
    RenderStats, SolidAngleGrid, DEGENERATE_INTENSITY,
};
pub use solid_angle::patch_solid_angle;
pub use spherical::{pixel_solid_angle, pixel_to_spherical};
pub use types::{GridConfig, SphericalInterval, FULL_SPHERE_SR};
