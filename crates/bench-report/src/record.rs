//! Rows of the benchmark results table.

use std::fmt;

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};

/// Memory access pattern used by a benchmark run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pattern {
    Sequential,
    Random,
    /// Any other value found in the `pattern` column. Such rows belong to neither view.
    Other(String),
}

impl Pattern {
    /// Short suffix used in series labels.
    pub fn suffix(&self) -> &str {
        match self {
            Pattern::Sequential => "Seq",
            Pattern::Random => "Rand",
            Pattern::Other(name) => name,
        }
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Sequential" => Pattern::Sequential,
            "Random" => Pattern::Random,
            _ => Pattern::Other(value),
        }
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pattern::Sequential => write!(f, "Sequential"),
            Pattern::Random => write!(f, "Random"),
            Pattern::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Lookup strategy under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    DirectAccess,
    BinarySearch,
    /// Hash table with one element per bin.
    Hash1,
    /// Hash table with 16 elements per bin.
    Hash16,
}

impl Strategy {
    /// All strategies in the order they are plotted.
    pub const ALL: [Strategy; 4] = [
        Strategy::DirectAccess,
        Strategy::BinarySearch,
        Strategy::Hash1,
        Strategy::Hash16,
    ];

    /// Name shown in chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::DirectAccess => "DirectAccess",
            Strategy::BinarySearch => "BinarySearch",
            Strategy::Hash1 => "Hash(bin=1)",
            Strategy::Hash16 => "Hash(bin=16)",
        }
    }

    /// Suffix of the strategy columns in the results table.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            Strategy::DirectAccess => "directaccess",
            Strategy::BinarySearch => "binarysearch",
            Strategy::Hash1 => "hash1",
            Strategy::Hash16 => "hash16",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Measured quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Throughput in MB/s.
    Bandwidth,
    /// Cost of a single lookup in CPU cycles.
    Latency,
}

impl Metric {
    /// Both metrics in the order their charts are laid out.
    pub const ALL: [Metric; 2] = [Metric::Bandwidth, Metric::Latency];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Bandwidth => "Bandwidth",
            Metric::Latency => "Latency",
        }
    }

    /// Y axis description of the metric chart.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Metric::Bandwidth => "Bandwidth (MB/s)",
            Metric::Latency => "Latency (cycles/lookup)",
        }
    }

    /// Prefix of the metric columns in the results table.
    pub fn column_prefix(&self) -> &'static str {
        match self {
            Metric::Bandwidth => "bw",
            Metric::Latency => "lat",
        }
    }

    /// Name of the table column holding this metric for the given strategy.
    pub fn column(&self, strategy: Strategy) -> String {
        format!("{}_{}", self.column_prefix(), strategy.column_suffix())
    }
}

/// Single row of the results table: measurements of all strategies for one dataset size and pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub pattern: Pattern,
    /// Dataset size in KB.
    #[serde(deserialize_with = "number")]
    pub size_kb: f64,
    #[serde(deserialize_with = "measurement")]
    pub bw_directaccess: f64,
    #[serde(deserialize_with = "measurement")]
    pub bw_binarysearch: f64,
    #[serde(deserialize_with = "measurement")]
    pub bw_hash1: f64,
    #[serde(deserialize_with = "measurement")]
    pub bw_hash16: f64,
    #[serde(deserialize_with = "measurement")]
    pub lat_directaccess: f64,
    #[serde(deserialize_with = "measurement")]
    pub lat_binarysearch: f64,
    #[serde(deserialize_with = "measurement")]
    pub lat_hash1: f64,
    #[serde(deserialize_with = "measurement")]
    pub lat_hash16: f64,
}

/// Parses a number surrounded by optional whitespace.
fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let field = String::deserialize(deserializer)?;
    field
        .trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("invalid number {:?}", field)))
}

/// Same as `number`, but an empty field is a missing measurement and reads as NaN.
fn measurement<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let field = String::deserialize(deserializer)?;
    let field = field.trim();
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field
        .parse()
        .map_err(|_| D::Error::custom(format!("invalid number {:?}", field)))
}

impl ResultRecord {
    /// Returns bandwidth of the strategy in MB/s.
    pub fn bandwidth(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::DirectAccess => self.bw_directaccess,
            Strategy::BinarySearch => self.bw_binarysearch,
            Strategy::Hash1 => self.bw_hash1,
            Strategy::Hash16 => self.bw_hash16,
        }
    }

    /// Returns latency of the strategy in cycles per lookup.
    pub fn latency(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::DirectAccess => self.lat_directaccess,
            Strategy::BinarySearch => self.lat_binarysearch,
            Strategy::Hash1 => self.lat_hash1,
            Strategy::Hash16 => self.lat_hash16,
        }
    }

    pub fn value(&self, metric: Metric, strategy: Strategy) -> f64 {
        match metric {
            Metric::Bandwidth => self.bandwidth(strategy),
            Metric::Latency => self.latency(strategy),
        }
    }
}
