//! Writing the figure to PDF and PNG files and showing it.
//!
//! The figure is drawn once into an SVG document. The PDF is converted from that document and the PNG is
//! rasterized from it, so both files are composed identically and cover exactly the figure canvas.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info, warn};
use plotters::prelude::*;

use crate::config::FigureConfig;
use crate::error::ReportError;
use crate::figure::Figure;
use crate::render::draw_figure;

/// Output file format, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Png,
    Svg,
}

impl OutputFormat {
    /// Guesses the format from the path extension, PNG if unknown.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "pdf" => OutputFormat::Pdf,
            Some(ext) if ext == "svg" => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

/// Composes the figure and writes it to output files.
pub struct FigureExporter {
    config: FigureConfig,
}

impl FigureExporter {
    pub fn new(config: FigureConfig) -> Self {
        Self { config }
    }

    /// Draws the figure into an SVG document sized in points.
    pub fn compose(&self, figure: &Figure) -> Result<String, ReportError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.config.size_in_points()).into_drawing_area();
            draw_figure(&root, figure).map_err(|e| ReportError::Render(e.to_string()))?;
            root.present().map_err(|e| ReportError::Render(e.to_string()))?;
        }
        debug!("Composed figure: {} bytes of SVG", svg.len());
        Ok(svg)
    }

    /// Writes the figure to every path, the format of each file is taken from its extension.
    pub fn export(&self, figure: &Figure, paths: &[PathBuf]) -> Result<(), ReportError> {
        let svg = self.compose(figure)?;
        for path in paths {
            let data = match OutputFormat::from_path(path) {
                OutputFormat::Pdf => self.to_pdf(&svg)?,
                OutputFormat::Png => self.to_png(&svg)?,
                OutputFormat::Svg => svg.clone().into_bytes(),
            };
            fs::write(path, &data).map_err(|source| ReportError::Write {
                path: path.clone(),
                source,
            })?;
            info!("Wrote {} ({} bytes)", path.display(), data.len());
        }
        Ok(())
    }

    /// Converts the SVG document to a single-page PDF, one document point per PDF point.
    pub fn to_pdf(&self, svg: &str) -> Result<Vec<u8>, ReportError> {
        let mut options = svg2pdf::usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let tree = svg2pdf::usvg::Tree::from_str(svg, &options).map_err(|e| ReportError::Pdf(e.to_string()))?;
        svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), svg2pdf::PageOptions::default())
            .map_err(|e| ReportError::Pdf(format!("{:?}", e)))
    }

    /// Rasterizes the SVG document at the configured DPI and encodes it as PNG.
    pub fn to_png(&self, svg: &str) -> Result<Vec<u8>, ReportError> {
        use resvg::tiny_skia::{Color, Pixmap, Transform};

        let mut options = resvg::usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let tree = resvg::usvg::Tree::from_str(svg, &options).map_err(|e| ReportError::Raster(e.to_string()))?;

        let (width, height) = self.config.size_in_pixels();
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| ReportError::Raster(format!("invalid image size {}x{}", width, height)))?;
        pixmap.fill(Color::WHITE);
        let scale = self.config.raster_scale();
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        pixmap.encode_png().map_err(|e| ReportError::Raster(e.to_string()))
    }
}

/// Opens the file in the platform viewer.
///
/// Failure is not fatal: hosts without a display have no viewer.
pub fn show(path: &Path) {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    match command.arg(path).spawn() {
        Ok(_) => debug!("Opened {} in viewer", path.display()),
        Err(e) => warn!("Can't display {}: {}", path.display(), e),
    }
}
