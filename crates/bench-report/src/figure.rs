//! Figure model: what is drawn on the bandwidth and latency charts.
//!
//! The model is independent of the drawing backend. It fixes the visual encoding of every series
//! (colour and marker per strategy, line kind and opacity per pattern), the cache-level reference lines,
//! and the log-scale axis ranges. Points that can't be shown on a log axis (zero, negative or non-finite
//! coordinates) are masked: they are not drawn and they split the line into separate segments.

use std::ops::Range;

use log::debug;
use plotters::style::RGBColor;

use crate::record::{Metric, Pattern, Strategy};
use crate::table::{ResultTable, ResultView};

/// Margin added to each side of an axis range, as a fraction of its span in decades.
const AXIS_MARGIN: f64 = 0.05;

/// Range used for an axis with nothing to show.
const EMPTY_AXIS_RANGE: Range<f64> = 1.0..10.0;

/// Approximate cache capacities in KB, marked on the dataset size axis.
pub const CACHE_LEVELS: [ReferenceLine; 3] = [
    ReferenceLine { x: 32., label: "L1" },
    ReferenceLine { x: 256., label: "L2" },
    ReferenceLine { x: 10000., label: "L3" },
];

/// Reference labels are drawn this many times above the lower y bound.
pub const REFERENCE_LABEL_OFFSET: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Diamond,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
}

/// Visual encoding of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub marker: Marker,
    pub line: LineKind,
    pub opacity: f64,
    pub line_width: u32,
    /// Marker diameter.
    pub marker_size: u32,
}

impl SeriesStyle {
    /// Returns the style of a strategy measured with the given pattern.
    ///
    /// Colour and marker depend only on the strategy, so both charts encode strategies the same way.
    pub fn new(strategy: Strategy, pattern: &Pattern) -> Self {
        let (line, opacity) = match pattern {
            Pattern::Sequential => (LineKind::Solid, 1.0),
            _ => (LineKind::Dashed, 0.7),
        };
        Self {
            color: strategy_color(strategy),
            marker: strategy_marker(strategy),
            line,
            opacity,
            line_width: 2,
            marker_size: 6,
        }
    }
}

pub fn strategy_color(strategy: Strategy) -> RGBColor {
    match strategy {
        Strategy::DirectAccess => RGBColor(0x1f, 0x77, 0xb4),
        Strategy::BinarySearch => RGBColor(0xff, 0x7f, 0x0e),
        Strategy::Hash1 => RGBColor(0x2c, 0xa0, 0x2c),
        Strategy::Hash16 => RGBColor(0xd6, 0x27, 0x28),
    }
}

pub fn strategy_marker(strategy: Strategy) -> Marker {
    match strategy {
        Strategy::DirectAccess => Marker::Circle,
        Strategy::BinarySearch => Marker::Square,
        Strategy::Hash1 => Marker::Triangle,
        Strategy::Hash16 => Marker::Diamond,
    }
}

/// Returns true if the value can be placed on a log axis.
pub fn is_plottable(value: f64) -> bool {
    value.is_finite() && value > 0.
}

/// Vertical line marking a dataset size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceLine {
    pub x: f64,
    pub label: &'static str,
}

/// Line series of one strategy under one access pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub strategy: Strategy,
    pub pattern: Pattern,
    pub style: SeriesStyle,
    /// `(size_kb, value)` pairs in table order, including masked ones.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(metric: Metric, strategy: Strategy, view: &ResultView) -> Self {
        let pattern = view.pattern().clone();
        Self {
            label: format!("{}-{}", strategy.label(), pattern.suffix()),
            strategy,
            style: SeriesStyle::new(strategy, &pattern),
            pattern,
            points: view.points(metric, strategy),
        }
    }

    /// Points drawn on the chart.
    pub fn plottable_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().filter(|&(x, y)| is_plottable(x) && is_plottable(y))
    }

    /// Runs of consecutive plottable points, each drawn as a separate line.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            if is_plottable(x) && is_plottable(y) {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    pub fn masked_count(&self) -> usize {
        self.points.len() - self.plottable_points().count()
    }
}

/// Log-log chart of one metric.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub metric: Metric,
    /// Sequential series of all strategies followed by the Random ones.
    pub series: Vec<Series>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl Chart {
    pub fn new(metric: Metric, sequential: &ResultView, random: &ResultView) -> Self {
        let series: Vec<Series> = [sequential, random]
            .iter()
            .flat_map(|view| Strategy::ALL.iter().map(move |&strategy| Series::new(metric, strategy, view)))
            .collect();
        for s in series.iter().filter(|s| s.masked_count() > 0) {
            debug!(
                "{} chart: {} non-positive points of {} are not drawn",
                metric.name(),
                s.masked_count(),
                s.label
            );
        }
        Self {
            metric,
            series,
            reference_lines: CACHE_LEVELS.to_vec(),
        }
    }

    pub fn title(&self) -> String {
        format!("{} - Sequential vs Random Access", self.metric.name())
    }

    pub fn x_label(&self) -> &'static str {
        "Dataset Size (KB)"
    }

    pub fn y_label(&self) -> &'static str {
        self.metric.axis_label()
    }

    /// Dataset size range covering all drawn points and reference lines.
    pub fn x_range(&self) -> Range<f64> {
        let sizes = self.series.iter().flat_map(|s| s.plottable_points().map(|(x, _)| x));
        log_range(sizes.chain(self.reference_lines.iter().map(|line| line.x)))
    }

    /// Metric range covering all drawn points.
    pub fn y_range(&self) -> Range<f64> {
        log_range(self.series.iter().flat_map(|s| s.plottable_points().map(|(_, y)| y)))
    }

    /// Legend entries split into two columns: Sequential series first, then Random ones.
    pub fn legend_columns(&self) -> (&[Series], &[Series]) {
        self.series.split_at((self.series.len() + 1) / 2)
    }
}

/// Returns a log-scale range containing all plottable values with a margin on both sides.
pub fn log_range<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
    let (min, max) = values
        .filter(|&v| is_plottable(v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| (min.min(v), max.max(v)));
    if min > max {
        return EMPTY_AXIS_RANGE;
    }
    let (low, high) = (min.log10(), max.log10());
    let margin = if high > low {
        (high - low) * AXIS_MARGIN
    } else {
        2f64.log10()
    };
    10f64.powf(low - margin)..10f64.powf(high + margin)
}

/// Bandwidth and latency charts placed side by side.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub charts: Vec<Chart>,
}

impl Figure {
    pub fn build(table: &ResultTable) -> Self {
        let sequential = table.view(Pattern::Sequential);
        let random = table.view(Pattern::Random);
        Self {
            charts: Metric::ALL
                .iter()
                .map(|&metric| Chart::new(metric, &sequential, &random))
                .collect(),
        }
    }
}
