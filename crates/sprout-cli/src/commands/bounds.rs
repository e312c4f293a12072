use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sprout_core::pipeline::AnalysisConfig;

use crate::summary::print_bounds_summary;

#[derive(Args)]
pub struct BoundsArgs {
    /// Input photograph
    pub file: PathBuf,

    /// Override the clustering seed
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: &BoundsArgs, config: &AnalysisConfig) -> Result<()> {
    let image = super::load_image(&args.file)?;

    let mut estimator = config.estimator();
    if let Some(seed) = args.seed {
        estimator = estimator.with_seed(seed);
    }
    let estimate = estimator.estimate_detailed(&image);

    print_bounds_summary(&args.file, &estimate);
    Ok(())
}
