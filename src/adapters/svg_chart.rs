//! SVG line chart of portfolio value against its benchmarks.

use crate::domain::error::OptfolioError;
use crate::domain::valuation::ValuationResult;
use crate::ports::report_port::ReportPort;
use std::fs;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const PADDING: f64 = 60.0;
const COLORS: [&str; 6] = ["#4fc3f7", "#ffb74d", "#81c784", "#e57373", "#ba68c8", "#fff176"];
const EMPTY_CHART: &str =
    "<svg xmlns=\"http://www.w3.org/2000/svg\"><text>No portfolio data available.</text></svg>";

struct Line<'a> {
    label: String,
    values: &'a [f64],
}

/// Legend label with the final cumulative return, e.g. `SPY (12.34%)`.
pub fn legend_label(name: &str, cumulative_return: f64) -> String {
    format!("{} ({:.2}%)", name, cumulative_return * 100.0)
}

/// Escapes text for use inside an SVG element.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_chart(result: &ValuationResult) -> String {
    let totals = result.portfolio.totals();
    if totals.is_empty() {
        return EMPTY_CHART.to_string();
    }

    let bench_values: Vec<Vec<f64>> = result.benchmarks.iter().map(|b| b.values()).collect();
    let mut lines = vec![Line {
        label: legend_label(
            &result.instrument,
            result.portfolio.final_cumulative_return().unwrap_or(0.0),
        ),
        values: &totals,
    }];
    for (b, values) in result.benchmarks.iter().zip(&bench_values) {
        lines.push(Line {
            label: legend_label(&b.symbol, b.final_cumulative_return().unwrap_or(0.0)),
            values,
        });
    }

    let finite: Vec<f64> = lines
        .iter()
        .flat_map(|l| l.values.iter().copied())
        .filter(|v| v.is_finite())
        .collect();
    let min_value = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;
    let range = max_value - min_value;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if totals.len() > 1 {
        plot_width / (totals.len() - 1) as f64
    } else {
        0.0
    };

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
<rect width="100%" height="100%" fill="#111111"/>
<line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{b:.0}" stroke="#888888"/>
<line x1="{p:.0}" y1="{b:.0}" x2="{r:.0}" y2="{b:.0}" stroke="#888888"/>
<text x="{p:.0}" y="{ty:.0}" fill="#cccccc" font-size="12">${max:.2}</text>
<text x="{p:.0}" y="{by:.0}" fill="#cccccc" font-size="12">${min:.2}</text>
"##,
        w = WIDTH,
        h = HEIGHT,
        p = PADDING,
        b = HEIGHT - PADDING,
        r = WIDTH - PADDING,
        ty = PADDING - 8.0,
        by = HEIGHT - PADDING + 16.0,
        max = max_value,
        min = min_value,
    );

    for (i, line) in lines.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let points: Vec<String> = line
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(j, v)| {
                let x = PADDING + j as f64 * scale_x;
                let y = HEIGHT - PADDING - (v - min_value) * scale_y;
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        svg.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" points=\"{}\"/>\n",
            color,
            points.join(" ")
        ));
        svg.push_str(&format!(
            "<text x=\"{:.0}\" y=\"{:.0}\" fill=\"{}\" font-size=\"13\">{}</text>\n",
            PADDING + 10.0,
            PADDING + 18.0 * (i as f64 + 1.0),
            color,
            escape_xml(&line.label)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

pub struct SvgChartAdapter;

impl ReportPort for SvgChartAdapter {
    fn write(&self, result: &ValuationResult, output_path: &str) -> Result<(), OptfolioError> {
        fs::write(output_path, render_chart(result)).map_err(|e| OptfolioError::Report {
            reason: format!("failed to write chart {output_path}: {e}"),
        })
    }
}
