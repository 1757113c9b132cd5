//! Loading the results table and deriving per-pattern views.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{debug, info};

use crate::error::ReportError;
use crate::record::{Metric, Pattern, ResultRecord, Strategy};

/// Results table loaded verbatim from a CSV file.
///
/// Rows keep the input order. Columns are matched by header name, extra columns are ignored.
/// Pattern values are compared verbatim, so padded values belong to no view. An empty measurement is NaN.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRecord>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRecord>) -> Self {
        Self { rows }
    }

    /// Loads the table from CSV file with header row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::read(file, path)?;
        info!("Read {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Loads the table from CSV data with header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReportError> {
        Self::read(reader, Path::new("<reader>"))
    }

    fn read<R: Read>(reader: R, path: &Path) -> Result<Self, ReportError> {
        let mut reader = ReaderBuilder::new().has_headers(true).trim(Trim::Headers).from_reader(reader);
        let headers = reader.headers().map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(column) = required_columns().into_iter().find(|c| !headers.iter().any(|h| h == c)) {
            return Err(ReportError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }

        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: ResultRecord = record.map_err(|source| ReportError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ResultRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rows measured with the given access pattern, in input order.
    pub fn view(&self, pattern: Pattern) -> ResultView<'_> {
        let rows: Vec<&ResultRecord> = self.rows.iter().filter(|row| row.pattern == pattern).collect();
        debug!("{} view has {} rows", pattern, rows.len());
        ResultView { pattern, rows }
    }
}

/// Columns used by the report.
pub fn required_columns() -> Vec<String> {
    let mut columns = vec!["pattern".to_string(), "size_kb".to_string()];
    for metric in Metric::ALL {
        columns.extend(Strategy::ALL.iter().map(|&strategy| metric.column(strategy)));
    }
    columns
}

/// Read-only subset of table rows sharing the same access pattern.
#[derive(Clone, Debug)]
pub struct ResultView<'a> {
    pattern: Pattern,
    rows: Vec<&'a ResultRecord>,
}

impl<'a> ResultView<'a> {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn rows(&self) -> &[&'a ResultRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `(size_kb, value)` pairs of the metric for the strategy, in input order.
    pub fn points(&self, metric: Metric, strategy: Strategy) -> Vec<(f64, f64)> {
        self.rows.iter().map(|row| (row.size_kb, row.value(metric, strategy))).collect()
    }

    /// Returns metric values of the strategy, NaN values are skipped.
    pub fn values(&self, metric: Metric, strategy: Strategy) -> impl Iterator<Item = f64> + '_ {
        self.rows
            .iter()
            .map(move |row| row.value(metric, strategy))
            .filter(|value| !value.is_nan())
    }

    /// Maximum metric value of the strategy, `None` if the view has no values.
    pub fn max(&self, metric: Metric, strategy: Strategy) -> Option<f64> {
        self.values(metric, strategy).reduce(f64::max)
    }

    /// Minimum metric value of the strategy, `None` if the view has no values.
    pub fn min(&self, metric: Metric, strategy: Strategy) -> Option<f64> {
        self.values(metric, strategy).reduce(f64::min)
    }
}
