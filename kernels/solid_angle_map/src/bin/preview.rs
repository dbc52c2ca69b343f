// Solid Angle Map Preview CLI
//
// Renders the normalized per-pixel solid angle map for an equirectangular
// grid and displays it on stdout. Presentation glue only: the library core
// produces the image, this binary is just a stand-in display collaborator.
// Nothing is written to disk.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use solid_angle_map::*;

/// CLI arguments for the preview tool
#[derive(Parser, Debug)]
#[command(name = "preview")]
#[command(about = "Render an equirectangular solid angle map as terminal grayscale", long_about = None)]
struct Args {
    /// Image width in pixels (longitude bands)
    #[arg(short, long, default_value_t = 128, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height in pixels (latitude bands)
    #[arg(short = 'H', long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Print only the JSON statistics, skip the ASCII rendering
    #[arg(long, default_value_t = false)]
    stats_only: bool,
}

/// Characters from darkest to brightest used for the terminal rendering
const GRAY_RAMP: &[u8] = b" .:-=+*#%@";

/// Map a normalized intensity to a ramp character
fn ramp_char(intensity: f64) -> char {
    let last = GRAY_RAMP.len() - 1;
    let idx = (intensity.clamp(0.0, 1.0) * last as f64).round() as usize;
    GRAY_RAMP[idx] as char
}

/// Draw the image as ASCII grayscale, downsampled to fit a terminal
///
/// Terminal cells are roughly twice as tall as wide, so rows are stepped
/// twice as fast as columns to keep the map's proportions recognizable.
fn draw_ascii(image: &GrayscaleImage) {
    let max_cols: u32 = 96;
    let x_step = (image.width() + max_cols - 1) / max_cols;
    let x_step = x_step.max(1);
    let y_step = (x_step * 2).min(image.height());

    let mut y = 0;
    while y < image.height() {
        let mut line = String::new();
        let mut x = 0;
        while x < image.width() {
            line.push(ramp_char(image.intensity(x, y)));
            x += x_step;
        }
        println!("{}", line);
        y += y_step;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments (clap enforces positive dimensions)
    let args = Args::parse();

    let config = GridConfig::new(args.width, args.height);

    // Print configuration
    println!("\nSolid Angle Map Preview");
    println!("=======================================");
    println!("  Resolution: {}x{}", config.width, config.height);
    println!("  Cell size: {:.4} x {:.4} rad", config.d_phi(), config.d_theta());
    println!("  Pixels: {}", config.pixel_count());
    println!("=======================================\n");

    // Progress covers both passes of the pipeline
    let total_steps = 2 * config.pixel_count() as u64;
    let pb = ProgressBar::new(total_steps);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cells ({percent}%)")?
            .progress_chars("█▓▒░ "),
    );

    let mut image = GrayscaleImage::new(&config);
    let stats = render_map_into(&config, &mut image, |done| {
        pb.set_position(done);
    });
    pb.finish_with_message("render complete");

    // Statistics manifest
    println!("\nStatistics:");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    println!(
        "\n  Total solid angle: {:.9} sr (4π = {:.9})",
        stats.total_solid_angle, FULL_SPHERE_SR
    );
    if stats.degenerate {
        println!("  Degenerate grid (single latitude band): constant mid-gray output");
    }

    if !args.stats_only {
        println!("\nNormalized map (dark = small cells near the poles):\n");
        draw_ascii(&image);
        println!();
    }

    Ok(())
}
