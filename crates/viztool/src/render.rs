//! Raster rendering of chart specs.
//!
//! Covers the mark/encoding subset the orchestration layer needs: `line`,
//! `bar`, `point`, and `area` marks with an x and a quantitative y channel.
//! X values are plotted in row order with their display text as axis
//! labels, which handles nominal, ordinal, and month-granularity temporal
//! fields alike. Chart-grammar completeness is explicitly not a goal here.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use plotters::prelude::*;
use serde_json::Value;

use crate::chart::{ChartSpec, Encoding};
use crate::dataset::Dataset;
use crate::error::{Error, Result};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

const MARK_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Render `spec` against `dataset` and return PNG bytes.
pub fn render_png(dataset: &Dataset, spec: &ChartSpec) -> Result<Vec<u8>> {
    let mark = spec
        .mark_type()
        .ok_or_else(|| Error::Render("spec has no mark type".to_string()))?
        .to_string();
    if !matches!(mark.as_str(), "line" | "bar" | "point" | "circle" | "area") {
        return Err(Error::Render(format!("unsupported mark '{mark}'")));
    }

    let x = spec
        .x()
        .ok_or_else(|| Error::Render("spec has no x encoding".to_string()))?;
    let y = spec
        .y()
        .ok_or_else(|| Error::Render("spec has no y encoding".to_string()))?;
    let series = extract_series(dataset, x, y)?;

    let width = spec.width.unwrap_or(DEFAULT_WIDTH).clamp(64, 4096);
    let height = spec.height.unwrap_or(DEFAULT_HEIGHT).clamp(64, 4096);

    let mut buffer = vec![0u8; (width * height * 3) as usize];
    draw(
        &mut buffer,
        (width, height),
        &mark,
        &series,
        spec.title.as_deref(),
        x.label(),
        y.label(),
    )?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&buffer, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| Error::Render(format!("png encoding failed: {e}")))?;
    Ok(png)
}

/// Render to PNG and encode for the wire (standard padded base64, so the
/// round trip is byte-lossless).
pub fn render_png_base64(dataset: &Dataset, spec: &ChartSpec) -> Result<String> {
    Ok(STANDARD.encode(render_png(dataset, spec)?))
}

struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

fn extract_series(dataset: &Dataset, x: &Encoding, y: &Encoding) -> Result<Series> {
    for encoding in [x, y] {
        if !dataset.has_column(&encoding.field) {
            return Err(Error::Render(format!(
                "field '{}' not present in dataset (columns: {})",
                encoding.field,
                dataset.columns().join(", ")
            )));
        }
    }

    let mut labels = Vec::with_capacity(dataset.len());
    let mut values = Vec::with_capacity(dataset.len());
    for row in dataset.rows() {
        labels.push(display_text(&row[&x.field]));
        let value = row[&y.field].as_f64().ok_or_else(|| {
            Error::Render(format!(
                "field '{}' is not quantitative (value: {})",
                y.field, row[&y.field]
            ))
        })?;
        values.push(value);
    }
    Ok(Series { labels, values })
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn draw(
    buffer: &mut [u8],
    size: (u32, u32),
    mark: &str,
    series: &Series,
    title: Option<&str>,
    x_label: &str,
    y_label: &str,
) -> Result<()> {
    let n = series.values.len();
    let x_range = -0.5f64..(n.max(1) as f64 - 0.5);
    let (y_lo, y_hi) = y_range(&series.values);

    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(56);
    if let Some(title) = title {
        builder.caption(title, ("sans-serif", 22));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_lo..y_hi)
        .map_err(draw_err)?;

    let labels = &series.labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.clamp(1, 12))
        .x_label_formatter(&|pos: &f64| {
            let idx = pos.round();
            if (pos - idx).abs() < 0.3 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(draw_err)?;

    let points = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v));
    match mark {
        "line" => {
            chart
                .draw_series(LineSeries::new(points, MARK_COLOR.stroke_width(2)))
                .map_err(draw_err)?;
        }
        "point" | "circle" => {
            chart
                .draw_series(
                    points.map(|(i, v)| Circle::new((i, v), 4, MARK_COLOR.filled())),
                )
                .map_err(draw_err)?;
        }
        "area" => {
            chart
                .draw_series(
                    AreaSeries::new(points, 0.0, MARK_COLOR.mix(0.2))
                        .border_style(MARK_COLOR.stroke_width(2)),
                )
                .map_err(draw_err)?;
        }
        "bar" => {
            chart
                .draw_series(points.map(|(i, v)| {
                    Rectangle::new([(i - 0.35, 0.0), (i + 0.35, v)], MARK_COLOR.filled())
                }))
                .map_err(draw_err)?;
        }
        other => return Err(Error::Render(format!("unsupported mark '{other}'"))),
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

fn y_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let lo = min.min(0.0);
    let headroom = (max - lo).abs() * 0.1;
    let hi = if max + headroom > lo {
        max + headroom
    } else {
        lo + 1.0
    };
    (lo, hi)
}

fn draw_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}
