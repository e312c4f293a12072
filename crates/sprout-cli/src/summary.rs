use std::path::Path;

use console::Style;
use sprout_core::growth::Suggestion;
use sprout_core::metrics::{MetricName, MetricReport, MetricSet};
use sprout_core::pipeline::{GrowthAnalysis, ImageAnalysis};
use sprout_core::segmentation::{BoundsSource, GreenRangeEstimate};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    bad: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            bad: Style::new().red(),
            warn: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

fn format_metric(name: MetricName, value: f64) -> String {
    match name {
        MetricName::LeafCount | MetricName::BoundingBoxArea => {
            format!("{:.0} {}", value, name.unit())
        }
        MetricName::GreenPixelRatio => format!("{:.2}{}", value * name.display_scale(), name.unit()),
        _ => format!("{:.3}", value),
    }
}

pub fn print_bounds_summary(file: &Path, estimate: &GreenRangeEstimate) {
    let s = Styles::new();
    print_title(&s, "Green Range");

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(file.display()));
    println!("  {:<14}{}", s.label.apply_to("Bounds"), s.value.apply_to(estimate.bounds));
    let source = match estimate.source {
        BoundsSource::StaticFallback => s.warn.apply_to(estimate.source.to_string()),
        _ => s.good.apply_to(estimate.source.to_string()),
    };
    println!("  {:<14}{}", s.label.apply_to("Source"), source);
    if let Some([h, sat, v]) = estimate.center {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Center"),
            s.value.apply_to(format!("H {h:.1}, S {sat:.1}, V {v:.1}"))
        );
    }
    if !estimate.hue_peaks.is_empty() {
        println!(
            "  {:<14}{:?}",
            s.label.apply_to("Hue peaks"),
            estimate.hue_peaks
        );
    }
    if let Some(ref d) = estimate.degradation {
        println!("  {:<14}{}", s.label.apply_to("Fallback"), s.warn.apply_to(d));
    }
    println!();
}

fn print_metric_table(s: &Styles, metrics: &MetricSet) {
    println!("  {}", s.header.apply_to("Metrics"));
    for (name, value) in metrics.iter() {
        println!(
            "    {:<22}{}",
            s.label.apply_to(name.label()),
            s.value.apply_to(format_metric(name, value))
        );
    }
    println!();
}

fn print_report_details(s: &Styles, report: &MetricReport) {
    if let Some(bbox) = report.bounding_box {
        println!(
            "    {:<22}{}",
            s.label.apply_to("Plant box"),
            s.value.apply_to(format!(
                "{}x{} at ({}, {})",
                bbox.width, bbox.height, bbox.x, bbox.y
            ))
        );
    }
    let health = &report.color_health;
    println!(
        "    {:<22}{}",
        s.label.apply_to("Mean hue / sat / val"),
        s.value.apply_to(format!(
            "{:.1} / {:.1} / {:.1}",
            health.mean_hue, health.mean_saturation, health.mean_value
        ))
    );
    let sun = &report.sunlight;
    if let Some(ref err) = sun.error {
        println!("    {:<22}{}", s.label.apply_to("Sunlight"), s.warn.apply_to(err));
    } else {
        println!(
            "    {:<22}{}",
            s.label.apply_to("Sunlight image/weather"),
            s.value.apply_to(format!("{:.3} / {:.3}", sun.image_score, sun.weather_score))
        );
    }
    for d in &report.degradations {
        println!("    {:<22}{}", s.label.apply_to("Fallback"), s.warn.apply_to(d));
    }
    println!();
}

pub fn print_metrics_summary(file: &Path, analysis: &ImageAnalysis) {
    let s = Styles::new();
    print_title(&s, "Plant Metrics");

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(file.display()));
    println!(
        "  {:<14}{} ({})",
        s.label.apply_to("Green range"),
        s.value.apply_to(analysis.green_range.bounds),
        analysis.green_range.source
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Plant pixels"),
        s.value.apply_to(analysis.segmentation.plant_pixel_count())
    );
    if analysis.empty_input {
        println!("  {:<14}{}", s.label.apply_to("Input"), s.warn.apply_to("empty image"));
    }
    println!();

    print_metric_table(&s, analysis.metrics());
    print_report_details(&s, &analysis.report);
}

pub fn print_growth_summary(before: &Path, after: &Path, analysis: &GrowthAnalysis) {
    let s = Styles::new();
    print_title(&s, "Growth Comparison");

    println!("  {:<14}{}", s.label.apply_to("Before"), s.path.apply_to(before.display()));
    println!("  {:<14}{}", s.label.apply_to("After"), s.path.apply_to(after.display()));
    println!();

    println!("  {}", s.header.apply_to("Changes"));
    println!(
        "    {:<22}{:>14}{:>14}{:>10}",
        s.label.apply_to("Metric"),
        s.label.apply_to("Before"),
        s.label.apply_to("After"),
        s.label.apply_to("Delta")
    );
    let deltas = analysis.growth.rounded_deltas();
    for name in MetricName::ALL {
        let delta = deltas.get(&name).copied().unwrap_or(0.0);
        let delta_style = if delta > 0.0 {
            &s.good
        } else if delta < 0.0 {
            &s.bad
        } else {
            &s.label
        };
        println!(
            "    {:<22}{:>14}{:>14}{:>10}",
            name.label(),
            format_metric(name, analysis.before.metrics().get(name)),
            format_metric(name, analysis.after.metrics().get(name)),
            delta_style.apply_to(format!("{delta:+.2}%"))
        );
    }
    println!();

    let suggestion = analysis.growth.suggestion;
    let score_style = match suggestion {
        Suggestion::Excellent | Suggestion::Good => &s.good,
        Suggestion::Moderate => &s.warn,
        Suggestion::Limited => &s.bad,
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Growth score"),
        score_style.apply_to(format!("{:.1} / 100", analysis.growth.rounded_score()))
    );
    println!("  {:<14}{}", s.label.apply_to("Verdict"), s.value.apply_to(suggestion));
    println!("  {}", suggestion.message());

    for (side, image) in [("Before", &analysis.before), ("After", &analysis.after)] {
        for d in image.degradations() {
            println!("  {:<14}{}", s.label.apply_to(side), s.warn.apply_to(d));
        }
    }
    println!();
}
