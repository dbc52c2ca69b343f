// Two-pass rendering: raw solid angles, global extrema, grayscale output

use crate::spherical::pixel_solid_angle;
use crate::types::GridConfig;
use serde::Serialize;

// ============================================================================
// RAW SOLID ANGLE GRID
// ============================================================================

// Per-pixel raw solid angles, fully populated before normalization reads it
//
// The two-pass algorithm requires every value to exist before the global
// extrema are known, so this grid is allocated up front and written exactly
// once per cell during pass 1.
#[derive(Debug, Clone)]
pub struct SolidAngleGrid {
    values: Vec<f64>,
    width: u32,
    height: u32,
}

impl SolidAngleGrid {
    fn new(config: &GridConfig) -> Self {
        Self {
            values: vec![0.0; config.pixel_count()],
            width: config.width,
            height: config.height,
        }
    }

    // Row-major index for pixel (x, y)
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.values[self.index(x, y)]
    }

    #[inline]
    fn set(&mut self, x: u32, y: u32, value: f64) {
        let idx = self.index(x, y);
        self.values[idx] = value;
    }

    // Sum of all raw solid angles
    //
    // Row centers sit at θ = π·y/height, so the bands telescope to exactly
    // 4π·cos(π / (2·height)): the row straddling the north pole cancels to
    // zero and the band [π − π/(2h), π] is never covered. Converges to 4π
    // as the grid gets finer.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

// ============================================================================
// EXTREMA ACCUMULATOR
// ============================================================================

// Running min/max over the raw grid
//
// The reduction is associative and commutative: `update` folds one value in
// and `merge` combines two accumulators, so the result is independent of
// evaluation order. Scoped to pass 1, never stored on the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Extrema {
    pub min: f64,
    pub max: f64,
}

impl Extrema {
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn merge(&mut self, other: Extrema) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    // All observed values identical (single latitude band grids)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

impl Default for Extrema {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// IMAGE SINK (DISPLAY COLLABORATOR SEAM)
// ============================================================================

// Capability the renderer writes the finished map into
//
// Any bitmap/texture type of a host environment satisfies this: a pixel
// setter plus a finalize step that commits buffered writes. The renderer
// writes each pixel once during pass 2 and calls finalize exactly once.
// Intensities are always in [0, 1].
pub trait ImageSink {
    fn set_pixel(&mut self, x: u32, y: u32, intensity: f64);
    fn finalize(&mut self);
}

// In-memory grayscale image, the default display collaborator
#[derive(Debug, Clone)]
pub struct GrayscaleImage {
    width: u32,
    height: u32,
    pixels: Vec<f64>,
    finalized: bool,
}

impl GrayscaleImage {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            pixels: vec![0.0; config.pixel_count()],
            finalized: false,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn intensity(&self, x: u32, y: u32) -> f64 {
        assert!(x < self.width && y < self.height, "Pixel out of bounds");
        self.pixels[(y * self.width + x) as usize]
    }

    // Whether finalize() has committed the image
    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    // Pack into an 8-bit grayscale RGBA buffer (length width*height*4)
    //
    // The scalar intensity is replicated across R, G, B with opaque alpha,
    // ready for upload to any texture or canvas surface.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.pixels.len() * 4];
        for (i, &intensity) in self.pixels.iter().enumerate() {
            let g = (intensity.clamp(0.0, 1.0) * 255.0).round() as u8;
            let idx = i * 4;
            out[idx] = g;
            out[idx + 1] = g;
            out[idx + 2] = g;
            out[idx + 3] = 255;
        }
        out
    }
}

impl ImageSink for GrayscaleImage {
    fn set_pixel(&mut self, x: u32, y: u32, intensity: f64) {
        assert!(x < self.width && y < self.height, "Pixel out of bounds");
        self.pixels[(y * self.width + x) as usize] = intensity;
    }

    fn finalize(&mut self) {
        self.finalized = true;
    }
}

// ============================================================================
// RENDER STATISTICS
// ============================================================================

// Summary of one rendered map, serialized to JSON by the preview CLI
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderStats {
    pub width: u32,
    pub height: u32,
    pub min_solid_angle: f64,
    pub max_solid_angle: f64,
    pub total_solid_angle: f64,
    pub degenerate: bool,
}

// ============================================================================
// MAIN RENDER PIPELINE
// ============================================================================

// Intensity written when every cell has the same solid angle (height == 1).
// The normalization denominator vanishes there; a constant mid-gray keeps
// NaN/Inf out of the output.
pub const DEGENERATE_INTENSITY: f64 = 0.5;

// Pass 1: compute every raw solid angle and the global extrema
pub fn compute_raw_grid(config: &GridConfig) -> (SolidAngleGrid, Extrema) {
    let mut grid = SolidAngleGrid::new(config);
    let mut extrema = Extrema::new();

    for x in 0..config.width {
        for y in 0..config.height {
            let omega = pixel_solid_angle(config, x, y);
            grid.set(x, y, omega);
            extrema.update(omega);
        }
    }

    (grid, extrema)
}

// Render the normalized solid angle map into the given sink
//
// This is the main entry point that:
// 1. Computes the raw solid angle of every pixel and the global min/max
// 2. Rescales each value into [0, 1] against those extrema
// 3. Writes the grayscale intensities into the sink and finalizes it
//
// The progress callback receives the number of completed pixels across both
// passes (2 * width * height in total), letting a CLI drive a progress bar.
pub fn render_map_into<S, F>(config: &GridConfig, sink: &mut S, mut progress: F) -> RenderStats
where
    S: ImageSink,
    F: FnMut(u64),
{
    let pixels_per_pass = config.pixel_count() as u64;
    let mut done: u64 = 0;

    // Pass 1: raw values and extrema. Must fully complete before any cell is
    // normalized; the denominator below is not known until then.
    let (grid, extrema) = compute_raw_grid(config);
    done += pixels_per_pass;
    progress(done);

    let span = extrema.max - extrema.min;
    let degenerate = extrema.is_degenerate();

    // Pass 2: rescale into [0, 1] and hand each pixel to the sink
    for x in 0..config.width {
        for y in 0..config.height {
            let intensity = if degenerate {
                DEGENERATE_INTENSITY
            } else {
                (grid.get(x, y) - extrema.min) / span
            };
            sink.set_pixel(x, y, intensity);
            done += 1;
        }
        progress(done);
    }

    sink.finalize();

    RenderStats {
        width: config.width,
        height: config.height,
        min_solid_angle: extrema.min,
        max_solid_angle: extrema.max,
        total_solid_angle: grid.total(),
        degenerate,
    }
}

// Render into a fresh in-memory grayscale image
pub fn render_map(config: &GridConfig) -> GrayscaleImage {
    let mut image = GrayscaleImage::new(config);
    render_map_into(config, &mut image, |_| {});
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FULL_SPHERE_SR;
    use std::f64::consts::PI;

    #[test]
    fn test_extrema_reduction_order_independent() {
        let values = [0.3, -1.0, 2.5, 0.0];

        let mut folded = Extrema::new();
        for v in values {
            folded.update(v);
        }

        // Split reduction merged out of order gives the same answer
        let mut left = Extrema::new();
        left.update(values[2]);
        left.update(values[3]);
        let mut right = Extrema::new();
        right.update(values[1]);
        right.update(values[0]);
        left.merge(right);

        assert_eq!(folded.min, left.min);
        assert_eq!(folded.max, left.max);
        assert_eq!(folded.min, -1.0);
        assert_eq!(folded.max, 2.5);
    }

    #[test]
    fn test_raw_grid_total_closed_form() {
        // The row sums telescope: Σ = 4π·cos(π / (2·height)) exactly
        for (w, h) in [(4, 2), (128, 64), (7, 5), (1, 1)] {
            let config = GridConfig::new(w, h);
            let (grid, _) = compute_raw_grid(&config);
            let expected = FULL_SPHERE_SR * (PI / (2.0 * h as f64)).cos();
            assert!(
                (grid.total() - expected).abs() < 1e-9,
                "{}x{} grid sums to {}, expected {}",
                w,
                h,
                grid.total(),
                expected
            );
        }
    }

    #[test]
    fn test_raw_grid_total_converges_to_full_sphere() {
        // Finer latitude sampling closes the pole deficit
        let config = GridConfig::new(128, 64);
        let (grid, _) = compute_raw_grid(&config);
        assert!((grid.total() - FULL_SPHERE_SR).abs() < 0.005);

        let fine = GridConfig::new(16, 2048);
        let (fine_grid, _) = compute_raw_grid(&fine);
        assert!((fine_grid.total() - FULL_SPHERE_SR).abs() < 1e-5);
    }

    #[test]
    fn test_rows_share_identical_raw_values() {
        let config = GridConfig::new(16, 8);
        let (grid, _) = compute_raw_grid(&config);
        for y in 0..config.height {
            let reference = grid.get(0, y);
            for x in 1..config.width {
                assert_eq!(grid.get(x, y), reference);
            }
        }
    }

    #[test]
    fn test_four_by_two_scenario() {
        // Row 0 straddles the pole: (cos(-π/4) - cos(π/4)) * π/2 = 0.
        // Row 1 straddles the equator: (cos(π/4) - cos(3π/4)) * π/2 = √2·π/2.
        let config = GridConfig::new(4, 2);
        let (grid, extrema) = compute_raw_grid(&config);

        assert!(grid.get(0, 0).abs() < 1e-15);
        let expected = std::f64::consts::SQRT_2 * PI / 2.0;
        assert!((grid.get(0, 1) - expected).abs() < 1e-12);
        assert!(extrema.min.abs() < 1e-15);
        assert!((extrema.max - expected).abs() < 1e-12);

        // Normalized map: row 0 all 0.0, row 1 all 1.0
        let image = render_map(&config);
        for x in 0..4 {
            assert_eq!(image.intensity(x, 0), 0.0);
            assert_eq!(image.intensity(x, 1), 1.0);
        }
        assert!(image.is_finalized());
    }

    #[test]
    fn test_normalized_values_in_unit_range() {
        let config = GridConfig::new(128, 64);
        let image = render_map(&config);

        let mut saw_zero = false;
        let mut saw_one = false;
        for y in 0..config.height {
            for x in 0..config.width {
                let v = image.intensity(x, y);
                assert!(v.is_finite());
                assert!((0.0..=1.0).contains(&v));
                saw_zero |= v == 0.0;
                saw_one |= v == 1.0;
            }
        }
        // The minimum and maximum cells map to exactly 0 and 1
        assert!(saw_zero);
        assert!(saw_one);
    }

    #[test]
    fn test_single_row_grid_is_constant_mid_gray() {
        // height == 1: every cell has the same solid angle, min == max
        let config = GridConfig::new(8, 1);
        let (_, extrema) = compute_raw_grid(&config);
        assert!(extrema.is_degenerate());

        let image = render_map(&config);
        for x in 0..8 {
            let v = image.intensity(x, 0);
            assert!(v.is_finite());
            assert_eq!(v, DEGENERATE_INTENSITY);
        }
    }

    #[test]
    fn test_stats_report_extrema_and_total() {
        let config = GridConfig::new(4, 2);
        let mut image = GrayscaleImage::new(&config);
        let stats = render_map_into(&config, &mut image, |_| {});

        assert_eq!(stats.width, 4);
        assert_eq!(stats.height, 2);
        assert!(!stats.degenerate);
        assert!(stats.min_solid_angle.abs() < 1e-15);
        // 4×2 grid: 4 cells of 0 plus 4 cells of √2·π/2 = 2√2·π total
        let expected_total = 2.0 * std::f64::consts::SQRT_2 * PI;
        assert!((stats.total_solid_angle - expected_total).abs() < 1e-12);
    }

    #[test]
    fn test_progress_reaches_both_pass_totals() {
        let config = GridConfig::new(8, 4);
        let mut image = GrayscaleImage::new(&config);
        let mut last = 0u64;
        render_map_into(&config, &mut image, |done| last = done);
        assert_eq!(last, 2 * config.pixel_count() as u64);
    }

    #[test]
    fn test_rgba_packing() {
        let config = GridConfig::new(4, 2);
        let image = render_map(&config);
        let rgba = image.to_rgba8();
        assert_eq!(rgba.len(), 4 * 2 * 4);

        for px in rgba.chunks_exact(4) {
            // Grayscale: equal channels, opaque alpha
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
        // Row 0 normalizes to 0.0 → black, row 1 to 1.0 → white
        assert_eq!(rgba[0], 0);
        assert_eq!(rgba[4 * 4], 255);
    }
}
