use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sprout_core::growth::{ChartPoint, GrowthResult};
use sprout_core::pipeline::{compare_images_reported, AnalysisConfig, ImageSummary};

use super::WeatherArgs;
use crate::progress::SpinnerReporter;
use crate::summary::print_growth_summary;

#[derive(Args)]
pub struct CompareArgs {
    /// Earlier photograph
    pub before: PathBuf,

    /// Later photograph
    pub after: PathBuf,

    #[command(flatten)]
    pub weather: WeatherArgs,

    /// Print the full comparison as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    before: ImageSummary<'a>,
    after: ImageSummary<'a>,
    growth: &'a GrowthResult,
    chart: &'a [ChartPoint; 2],
}

pub fn run(args: &CompareArgs, config: &AnalysisConfig) -> Result<()> {
    let (before, after) = rayon::join(
        || super::load_image(&args.before),
        || super::load_image(&args.after),
    );
    let (before, after) = (before?, after?);
    let weather = args.weather.snapshot();

    let reporter = Arc::new(SpinnerReporter::new(args.json)?);
    let analysis = compare_images_reported(&before, &after, &weather, config, reporter.clone());
    reporter.finish();

    if args.json {
        let output = CompareOutput {
            before: ImageSummary::from(&analysis.before),
            after: ImageSummary::from(&analysis.after),
            growth: &analysis.growth,
            chart: &analysis.chart,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_growth_summary(&args.before, &args.after, &analysis);
    }

    Ok(())
}
