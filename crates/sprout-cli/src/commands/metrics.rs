use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sprout_core::pipeline::{analyze_image_reported, AnalysisConfig, ImageSummary};

use super::WeatherArgs;
use crate::progress::SpinnerReporter;
use crate::summary::print_metrics_summary;

#[derive(Args)]
pub struct MetricsArgs {
    /// Input photograph
    pub file: PathBuf,

    #[command(flatten)]
    pub weather: WeatherArgs,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &MetricsArgs, config: &AnalysisConfig) -> Result<()> {
    let image = super::load_image(&args.file)?;
    let weather = args.weather.snapshot();

    let reporter = SpinnerReporter::new(args.json)?;
    let analysis = analyze_image_reported(&image, &weather, config, &reporter);
    reporter.finish();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ImageSummary::from(&analysis))?);
    } else {
        print_metrics_summary(&args.file, &analysis);
    }

    Ok(())
}
