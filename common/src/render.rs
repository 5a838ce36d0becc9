use std::io::Write;

use eyre::{Context, Result};
use tracing::debug;

use crate::chart::BarChart;

/// Displays a [`BarChart`]. Aggregation never depends on which renderer is used.
pub trait Renderer {
    fn render(&mut self, chart: &BarChart) -> Result<()>;
}

const BAR_GLYPHS: &[char] = &['█', '▓', '▒', '░', '#', '=', '*', '+'];

/// Draws the chart as horizontal text bars, one cluster per thread count.
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TerminalRenderer<W> {
    /// `width` is the length in characters of the tallest bar
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar_len(&self, value: f64, max: f64) -> usize {
        if max <= 0.0 || value <= 0.0 {
            return 0;
        }
        ((value / max * self.width as f64).round() as usize).clamp(1, self.width)
    }
}

fn glyph(idx: usize) -> char {
    BAR_GLYPHS[idx % BAR_GLYPHS.len()]
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, chart: &BarChart) -> Result<()> {
        let labels = &chart.labels;
        writeln!(self.out, "{} by {}", labels.y_label, labels.x_label)?;

        let Some(max) = chart.max_value() else {
            writeln!(self.out, "(no data to plot)")?;
            return Ok(());
        };

        let cores_width = chart
            .series
            .iter()
            .map(|s| s.cpu_cores.to_string().len())
            .max()
            .unwrap_or(1);

        for (t_idx, threads) in chart.threads.iter().enumerate() {
            writeln!(self.out)?;
            writeln!(self.out, "{} = {threads}", labels.x_label)?;
            for (s_idx, series) in chart.series.iter().enumerate() {
                let Some(value) = series.values.get(t_idx).copied().flatten() else {
                    continue;
                };
                let bar = glyph(s_idx)
                    .to_string()
                    .repeat(self.bar_len(value, max));
                writeln!(
                    self.out,
                    "  {:>cores_width$} |{bar} {value:.3}",
                    series.cpu_cores
                )?;
            }
        }

        writeln!(self.out)?;
        let legend = chart
            .series
            .iter()
            .enumerate()
            .map(|(idx, s)| format!("{} {}", glyph(idx), s.cpu_cores))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(self.out, "{}: {legend}", labels.legend_title)?;
        self.out.flush().wrap_err("Flush chart output")?;
        debug!("Rendered {} clusters to terminal", chart.threads.len());
        Ok(())
    }
}

/// Writes the chart description as JSON, for display by external tooling.
pub struct JsonRenderer<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, chart: &BarChart) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, chart)?;
        } else {
            serde_json::to_writer(&mut self.out, chart)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
