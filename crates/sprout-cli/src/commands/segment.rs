use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sprout_core::io::{save_mask_png, save_rgb_png};
use sprout_core::pipeline::AnalysisConfig;

#[derive(Args)]
pub struct SegmentArgs {
    /// Input photograph
    pub file: PathBuf,

    /// Output path for the binary plant mask
    #[arg(short, long, default_value = "mask.png")]
    pub mask: PathBuf,

    /// Also save the plant-only image (background blacked out)
    #[arg(long)]
    pub plant: Option<PathBuf>,
}

pub fn run(args: &SegmentArgs, config: &AnalysisConfig) -> Result<()> {
    let image = super::load_image(&args.file)?;

    let estimate = config.estimator().estimate_detailed(&image);
    let segmentation = config.segmenter().segment(&image, &estimate.bounds);

    save_mask_png(&segmentation.mask, &args.mask)
        .with_context(|| format!("Failed to write mask {}", args.mask.display()))?;

    let total = segmentation.mask.len();
    let plant = segmentation.plant_pixel_count();
    println!(
        "Green range {} ({})",
        estimate.bounds, estimate.source
    );
    println!(
        "Plant pixels: {} of {} ({:.2}%)",
        plant,
        total,
        if total > 0 { plant as f64 / total as f64 * 100.0 } else { 0.0 }
    );
    println!("Mask saved to {}", args.mask.display());

    if let Some(ref path) = args.plant {
        save_rgb_png(&segmentation.plant_only, path)
            .with_context(|| format!("Failed to write plant image {}", path.display()))?;
        println!("Plant-only image saved to {}", path.display());
    }

    Ok(())
}
