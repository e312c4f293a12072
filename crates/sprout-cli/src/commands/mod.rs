pub mod bounds;
pub mod compare;
pub mod config;
pub mod metrics;
pub mod segment;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use sprout_core::frame::RgbFrame;
use sprout_core::io::load_rgb;
use sprout_core::metrics::WeatherSnapshot;
use sprout_core::pipeline::AnalysisConfig;
use tracing::debug;

/// Weather at capture time, used by the sunlight proxy.
#[derive(Args)]
pub struct WeatherArgs {
    /// Cloud cover percentage (0-100)
    #[arg(long, default_value = "30")]
    pub clouds: f64,

    /// UV index
    #[arg(long, default_value = "6")]
    pub uvi: f64,

    /// Free-text weather description
    #[arg(long = "weather", default_value = "Clear")]
    pub description: String,
}

impl WeatherArgs {
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            clouds: self.clouds,
            uvi: self.uvi,
            description: self.description.clone(),
        }
    }
}

/// Load and validate an analysis config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            debug!(path = %path.display(), "Loading analysis config");
            toml::from_str(&contents).context("Invalid analysis config")?
        }
        None => AnalysisConfig::default(),
    };
    config.validate().context("Invalid analysis config")?;
    Ok(config)
}

pub fn load_image(path: &Path) -> Result<RgbFrame> {
    let image =
        load_rgb(path).with_context(|| format!("Failed to load image {}", path.display()))?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}
