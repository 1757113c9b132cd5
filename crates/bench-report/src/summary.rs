//! Summary statistics printed after the charts are saved.

use std::fmt;

use serde::Serialize;

use crate::record::{Metric, Pattern, Strategy};
use crate::table::ResultTable;

const SEPARATOR_WIDTH: usize = 70;

/// DirectAccess extremes under both access patterns and the degradation between them.
///
/// Statistics are `None` when the corresponding view has no values and print as `nan`.
/// Ratios are `None` when their denominator is not positive.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Summary {
    /// Maximum Sequential bandwidth in MB/s.
    pub sequential_max_bandwidth: Option<f64>,
    /// Minimum Sequential latency in cycles.
    pub sequential_min_latency: Option<f64>,
    /// Maximum Random bandwidth in MB/s.
    pub random_max_bandwidth: Option<f64>,
    /// Minimum Random bandwidth in MB/s, the denominator of the bandwidth ratio.
    pub random_min_bandwidth: Option<f64>,
    /// Maximum Random latency in cycles.
    pub random_max_latency: Option<f64>,
    /// Sequential max bandwidth / Random min bandwidth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_ratio: Option<f64>,
    /// Random max latency / Sequential min latency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ratio: Option<f64>,
}

impl Summary {
    pub fn compute(table: &ResultTable) -> Self {
        let seq = table.view(Pattern::Sequential);
        let rand = table.view(Pattern::Random);
        let strategy = Strategy::DirectAccess;

        let sequential_max_bandwidth = seq.max(Metric::Bandwidth, strategy);
        let sequential_min_latency = seq.min(Metric::Latency, strategy);
        let random_max_bandwidth = rand.max(Metric::Bandwidth, strategy);
        let random_min_bandwidth = rand.min(Metric::Bandwidth, strategy);
        let random_max_latency = rand.max(Metric::Latency, strategy);

        Self {
            sequential_max_bandwidth,
            sequential_min_latency,
            random_max_bandwidth,
            random_min_bandwidth,
            random_max_latency,
            bandwidth_ratio: guarded_ratio(sequential_max_bandwidth, random_min_bandwidth),
            latency_ratio: guarded_ratio(random_max_latency, sequential_min_latency),
        }
    }
}

/// Divides only when the denominator is positive.
fn guarded_ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0. => Some(n / d),
        _ => None,
    }
}

struct Value(Option<f64>, usize);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.*}", self.1, value),
            None => write!(f, "nan"),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        writeln!(f, "{}", separator)?;
        writeln!(f, "SUMMARY STATISTICS")?;
        writeln!(f, "{}", separator)?;

        writeln!(f, "\nSequential Access - DirectAccessArray:")?;
        writeln!(f, "  Max Bandwidth: {} MB/s", Value(self.sequential_max_bandwidth, 0))?;
        writeln!(f, "  Min Latency: {} cycles", Value(self.sequential_min_latency, 1))?;

        writeln!(f, "\nRandom Access - DirectAccessArray:")?;
        writeln!(f, "  Max Bandwidth: {} MB/s", Value(self.random_max_bandwidth, 0))?;
        writeln!(f, "  Max Latency: {} cycles", Value(self.random_max_latency, 1))?;

        writeln!(f, "\nPerformance Degradation (Sequential vs Random):")?;
        if let Some(ratio) = self.bandwidth_ratio {
            writeln!(f, "  Bandwidth ratio: {:.1}x", ratio)?;
        }
        if let Some(ratio) = self.latency_ratio {
            writeln!(f, "  Latency ratio: {:.1}x", ratio)?;
        }

        writeln!(f, "\n{}", separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_requires_positive_denominator() {
        assert_eq!(guarded_ratio(Some(10.), Some(4.)), Some(2.5));
        assert_eq!(guarded_ratio(Some(10.), Some(0.)), None);
        assert_eq!(guarded_ratio(Some(10.), Some(-1.)), None);
        assert_eq!(guarded_ratio(Some(10.), None), None);
        assert_eq!(guarded_ratio(None, Some(2.)), None);
    }

    #[test]
    fn missing_value_is_printed_as_nan() {
        assert_eq!(Value(None, 1).to_string(), "nan");
        assert_eq!(Value(Some(12.345), 1).to_string(), "12.3");
        assert_eq!(Value(Some(9000.4), 0).to_string(), "9000");
    }
}
