use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::info;

use bench_report::export::{show, FigureExporter};
use bench_report::{Figure, ReportConfig, ResultTable, Summary};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
/// Plots bandwidth and latency of lookup strategies from benchmark results
struct Args {
    /// Path to YAML file with report configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to CSV file with benchmark results
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to produced PDF file
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Path to produced PNG file
    #[arg(long)]
    png: Option<PathBuf>,

    /// Resolution of the PNG file
    #[arg(long)]
    dpi: Option<u32>,

    /// Don't open the plots after saving
    #[arg(long = "no-show")]
    no_show: bool,

    /// Save summary statistics to JSON file
    #[arg(long = "summary-json")]
    summary_json: Option<PathBuf>,
}

impl Args {
    fn report_config(&self) -> anyhow::Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(pdf) = &self.pdf {
            config.pdf_output = pdf.clone();
        }
        if let Some(png) = &self.png {
            config.png_output = png.clone();
        }
        if let Some(dpi) = self.dpi {
            config.figure.dpi = dpi;
        }
        if self.no_show {
            config.show = false;
        }
        Ok(config)
    }
}

/// Saves summary as JSON, undefined ratios are left out.
fn write_summary_json(path: &Path, summary: &Summary) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(summary)?)
        .with_context(|| format!("can't write {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();
    let config = args.report_config()?;
    info!("Report config: {:?}", config);

    println!("Reading {}...", config.input.display());
    let table = ResultTable::load(&config.input)?;

    let figure = Figure::build(&table);

    println!("Saving plots...");
    let outputs = [config.pdf_output.clone(), config.png_output.clone()];
    FigureExporter::new(config.figure.clone()).export(&figure, &outputs)?;
    for path in &outputs {
        println!("✓ Saved: {}", path.display());
    }

    if config.show {
        println!("\nDisplaying plots...");
        show(&config.png_output);
    }

    let summary = Summary::compute(&table);
    println!();
    print!("{}", summary);
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &summary)?;
        println!("Summary saved to {}", path.display());
    }

    println!("Plots ready! Use {} in your report.", config.pdf_output.display());
    println!("{}", "=".repeat(70));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bench-plot").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_keep_defaults() {
        assert_eq!(args(&[]).report_config().unwrap(), ReportConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let config = args(&["--input", "run1.csv", "--png", "out/run1.png", "--dpi", "100", "--no-show"])
            .report_config()
            .unwrap();
        assert_eq!(config.input, PathBuf::from("run1.csv"));
        assert_eq!(config.png_output, PathBuf::from("out/run1.png"));
        assert_eq!(config.pdf_output, PathBuf::from("benchmark_plots.pdf"));
        assert_eq!(config.figure.dpi, 100);
        assert_eq!(config.figure.width, 16.);
        assert!(!config.show);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yaml");
        std::fs::write(&path, "input: results.csv\nshow: false\nfigure:\n  dpi: 150\n").unwrap();
        let config = args(&["--config", path.to_str().unwrap(), "--dpi", "72"])
            .report_config()
            .unwrap();
        assert_eq!(config.input, PathBuf::from("results.csv"));
        assert_eq!(config.figure.dpi, 72);
        assert!(!config.show);
    }

    #[test]
    fn missing_config_file_is_fatal() {
        assert!(args(&["--config", "no_such_dir/report.yaml"]).report_config().is_err());
    }

    #[test]
    fn summary_json_omits_undefined_ratios() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = Summary {
            sequential_max_bandwidth: Some(9000.),
            sequential_min_latency: Some(1.5),
            random_max_bandwidth: Some(5200.),
            random_min_bandwidth: Some(0.),
            random_max_latency: Some(7.5),
            bandwidth_ratio: None,
            latency_ratio: Some(5.),
        };
        write_summary_json(&path, &summary).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let fields = json.as_object().unwrap();
        assert_eq!(fields["sequential_max_bandwidth"], 9000.);
        assert_eq!(fields["random_min_bandwidth"], 0.);
        assert_eq!(fields["latency_ratio"], 5.);
        assert!(!fields.contains_key("bandwidth_ratio"));
    }

    #[test]
    fn summary_json_keeps_undefined_statistics_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&path, &Summary::default()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["random_max_latency"].is_null());
        assert!(!json.as_object().unwrap().contains_key("latency_ratio"));
    }
}
