//! Drawing the figure with plotters.
//!
//! Drawing is generic over the backend. Sizes are given in backend units, which the exporter maps to
//! points of the vector document.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::figure::{Chart, Figure, LineKind, Marker, Series, REFERENCE_LABEL_OFFSET};

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 14;
const AXIS_FONT_SIZE: u32 = 12;
const TICK_FONT_SIZE: u32 = 10;
const LEGEND_FONT_SIZE: u32 = 9;
const REFERENCE_FONT_SIZE: u32 = 8;

const DASH_SIZE: i32 = 6;
const DASH_SPACING: i32 = 4;

/// Legend sample line length.
const LEGEND_SAMPLE_WIDTH: i32 = 24;
const LEGEND_ROW_HEIGHT: i32 = 14;
const LEGEND_COLUMN_WIDTH: i32 = 130;
const LEGEND_PADDING: i32 = 6;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Draws the figure charts side by side on the whole drawing area.
pub fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, figure.charts.len().max(1)));
    for (chart, panel) in figure.charts.iter().zip(panels.iter()) {
        draw_chart(root, panel, chart)?;
    }
    Ok(())
}

/// Draws a single log-log chart on `panel`.
///
/// Markers and the legend are drawn on `root` in backend pixel coordinates.
fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    panel: &DrawingArea<DB, Shift>,
    chart: &Chart,
) -> DrawResult<DB> {
    let x_range = chart.x_range();
    let y_range = chart.y_range();

    let mut ctx = ChartBuilder::on(panel)
        .caption(chart.title(), (FONT, TITLE_FONT_SIZE, FontStyle::Bold).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone().log_scale(), y_range.clone().log_scale())?;

    ctx.configure_mesh()
        .x_desc(chart.x_label())
        .y_desc(chart.y_label())
        .axis_desc_style((FONT, AXIS_FONT_SIZE).into_font())
        .label_style((FONT, TICK_FONT_SIZE).into_font())
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.1))
        .x_label_formatter(&|v: &f64| format_tick(*v))
        .y_label_formatter(&|v: &f64| format_tick(*v))
        .draw()?;

    for series in &chart.series {
        let style = line_style(series);
        for segment in series.segments() {
            match series.style.line {
                LineKind::Solid => {
                    ctx.draw_series(LineSeries::new(segment, style))?;
                }
                LineKind::Dashed => {
                    ctx.draw_series(DashedLineSeries::new(segment, DASH_SIZE, DASH_SPACING, style))?;
                }
            }
        }
        let fill = marker_style(series);
        for point in series.plottable_points() {
            let at = ctx.plotting_area().map_coordinate(&point);
            draw_marker(root, at, series.style.marker, series.style.marker_size, fill)?;
        }
    }

    let reference_style = ShapeStyle {
        color: RGBColor(0x80, 0x80, 0x80).mix(0.5),
        filled: false,
        stroke_width: 1,
    };
    let label_y = y_range.start * REFERENCE_LABEL_OFFSET;
    for line in &chart.reference_lines {
        ctx.draw_series(DashedLineSeries::new(
            vec![(line.x, y_range.start), (line.x, y_range.end)],
            1,
            3,
            reference_style,
        ))?;
        ctx.draw_series(std::iter::once(Text::new(
            line.label,
            (line.x, label_y),
            (FONT, REFERENCE_FONT_SIZE).into_font().color(&BLACK.mix(0.7)),
        )))?;
    }

    let (x_pixels, y_pixels) = ctx.plotting_area().get_pixel_range();
    draw_legend(root, (x_pixels.end, y_pixels.start), chart)
}

fn line_style(series: &Series) -> ShapeStyle {
    ShapeStyle {
        color: series.style.color.mix(series.style.opacity),
        filled: false,
        stroke_width: series.style.line_width,
    }
}

fn marker_style(series: &Series) -> ShapeStyle {
    series.style.color.mix(series.style.opacity).filled()
}

/// Draws a marker of `size` diameter centered at `at`.
fn draw_marker<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    at: (i32, i32),
    marker: Marker,
    size: u32,
    style: ShapeStyle,
) -> DrawResult<DB> {
    let r = (size / 2).max(1) as i32;
    match marker {
        Marker::Circle => root.draw(&Circle::new(at, r, style)),
        Marker::Square => root.draw(&Rectangle::new([(at.0 - r, at.1 - r), (at.0 + r, at.1 + r)], style)),
        Marker::Triangle => root.draw(&Polygon::new(
            vec![(at.0, at.1 - r), (at.0 + r, at.1 + r), (at.0 - r, at.1 + r)],
            style,
        )),
        Marker::Diamond => root.draw(&Polygon::new(
            vec![(at.0, at.1 - r), (at.0 + r, at.1), (at.0, at.1 + r), (at.0 - r, at.1)],
            style,
        )),
    }
}

/// Draws a two-column legend whose top right corner is at `corner`.
fn draw_legend<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, corner: (i32, i32), chart: &Chart) -> DrawResult<DB> {
    let (left, right) = chart.legend_columns();
    let rows = left.len().max(right.len()) as i32;
    let width = 2 * LEGEND_COLUMN_WIDTH + 2 * LEGEND_PADDING;
    let height = rows * LEGEND_ROW_HEIGHT + 2 * LEGEND_PADDING;
    let origin = (corner.0 - width - LEGEND_PADDING, corner.1 + LEGEND_PADDING);

    root.draw(&Rectangle::new(
        [origin, (origin.0 + width, origin.1 + height)],
        WHITE.mix(0.8).filled(),
    ))?;
    root.draw(&Rectangle::new(
        [origin, (origin.0 + width, origin.1 + height)],
        BLACK.mix(0.2).stroke_width(1),
    ))?;

    for (column, entries) in [left, right].iter().enumerate() {
        let x = origin.0 + LEGEND_PADDING + column as i32 * LEGEND_COLUMN_WIDTH;
        for (row, series) in entries.iter().enumerate() {
            let y = origin.1 + LEGEND_PADDING + row as i32 * LEGEND_ROW_HEIGHT + LEGEND_ROW_HEIGHT / 2;
            draw_legend_sample(root, (x, y), series)?;
            root.draw(&Text::new(
                series.label.as_str(),
                (x + LEGEND_SAMPLE_WIDTH + 4, y - LEGEND_FONT_SIZE as i32 / 2),
                (FONT, LEGEND_FONT_SIZE).into_font(),
            ))?;
        }
    }
    Ok(())
}

fn draw_legend_sample<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    at: (i32, i32),
    series: &Series,
) -> DrawResult<DB> {
    let style = line_style(series);
    let (x, y) = at;
    match series.style.line {
        LineKind::Solid => root.draw(&PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE_WIDTH, y)], style))?,
        LineKind::Dashed => {
            let mut start = x;
            while start < x + LEGEND_SAMPLE_WIDTH {
                let end = (start + DASH_SIZE).min(x + LEGEND_SAMPLE_WIDTH);
                root.draw(&PathElement::new(vec![(start, y), (end, y)], style))?;
                start = end + DASH_SPACING;
            }
        }
    }
    draw_marker(
        root,
        (x + LEGEND_SAMPLE_WIDTH / 2, y),
        series.style.marker,
        series.style.marker_size,
        marker_style(series),
    )
}

/// Formats a log axis tick, e.g. `16`, `4096`, `0.5`.
fn format_tick(value: f64) -> String {
    if value >= 1. {
        format!("{:.0}", value)
    } else {
        let digits = (-value.log10()).ceil().max(1.) as usize;
        format!("{:.*}", digits, value)
    }
}
