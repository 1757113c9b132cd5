//! Report configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Size and resolution of the exported figure.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FigureConfig {
    /// Figure width in inches.
    pub width: f64,
    /// Figure height in inches.
    pub height: f64,
    /// Resolution of the raster output.
    pub dpi: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 16.,
            height: 6.,
            dpi: 300,
        }
    }
}

impl FigureConfig {
    /// Units per inch of the composed vector document.
    pub const POINTS_PER_INCH: f64 = 72.;

    /// Size of the vector document in points.
    pub fn size_in_points(&self) -> (u32, u32) {
        (
            (self.width * Self::POINTS_PER_INCH).round() as u32,
            (self.height * Self::POINTS_PER_INCH).round() as u32,
        )
    }

    /// Size of the raster image in pixels.
    pub fn size_in_pixels(&self) -> (u32, u32) {
        (
            (self.width * self.dpi as f64).round() as u32,
            (self.height * self.dpi as f64).round() as u32,
        )
    }

    /// Pixels per point of the raster image.
    pub fn raster_scale(&self) -> f32 {
        (self.dpi as f64 / Self::POINTS_PER_INCH) as f32
    }
}

/// Represents report configuration.
///
/// All fields have defaults, so the tool runs without any configuration.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    /// Benchmark results table.
    pub input: PathBuf,
    /// Vector output.
    pub pdf_output: PathBuf,
    /// Raster output.
    pub png_output: PathBuf,
    pub figure: FigureConfig,
    /// Open the raster output in the platform viewer after saving.
    pub show: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("benchmark_results.csv"),
            pdf_output: PathBuf::from("benchmark_plots.pdf"),
            png_output: PathBuf::from("benchmark_plots.png"),
            figure: FigureConfig::default(),
            show: true,
        }
    }
}

impl ReportConfig {
    /// Reads config from YAML file, missing fields take default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&data).map_err(|source| ReportError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(data: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(data)
    }
}
