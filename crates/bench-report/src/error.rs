//! Errors produced while building a report.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of the report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input file can't be opened or read.
    #[error("can't read {path}")]
    Io {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Input table has a missing column or a malformed row.
    #[error("malformed results table {path}")]
    Csv {
        /// Path of the input file (`<reader>` when loading from a reader).
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },
    /// Input table has no column required for the report.
    #[error("results table {path} has no column `{column}`")]
    MissingColumn {
        /// Path of the input file.
        path: PathBuf,
        /// Name of the missing column.
        column: String,
    },
    /// Config file can't be parsed.
    #[error("can't parse config {path}")]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
    /// Chart drawing failed.
    #[error("failed to render figure: {0}")]
    Render(String),
    /// SVG document could not be rasterized.
    #[error("failed to rasterize figure: {0}")]
    Raster(String),
    /// SVG document could not be converted to PDF.
    #[error("failed to convert figure to PDF: {0}")]
    Pdf(String),
    /// Output file can't be written.
    #[error("can't write {path}")]
    Write {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
