//! Terminal heatmap renderer

use crate::constants::plot::{COLORBAR_LABEL, TITLE, X_LABEL, Y_LABEL};
use crate::coord::binning::format_degrees;
use crate::error::Result;
use crate::heatmap::{Heatmap, HeatmapRenderer};

/// Shade glyphs from empty to densest
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Text renderer - count grid with shade glyphs
pub struct TextRenderer;

impl HeatmapRenderer for TextRenderer {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Count grid for the terminal"
    }

    fn content_type(&self) -> &str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, heatmap: &Heatmap) -> Result<String> {
        let max = heatmap.max_count();
        let lat_labels: Vec<String> = heatmap.lats.iter().map(|v| format_degrees(*v)).collect();
        let lng_labels: Vec<String> = heatmap.lngs.iter().map(|v| format_degrees(*v)).collect();

        let row_w = lat_labels.iter().map(String::len).max().unwrap_or(0).max(Y_LABEL.len());
        let col_w = lng_labels
            .iter()
            .map(String::len)
            .chain(std::iter::once(max.to_string().len() + 2))
            .max()
            .unwrap_or(1);

        let mut output = String::new();
        output.push_str(&format!("{}\n", TITLE));
        output.push_str(&format!("{:>row_w$} | {}\n", Y_LABEL, X_LABEL, row_w = row_w));

        output.push_str(&format!("{:>row_w$} |", "", row_w = row_w));
        for label in &lng_labels {
            output.push_str(&format!(" {:>col_w$}", label, col_w = col_w));
        }
        output.push('\n');

        for (label, counts) in lat_labels.iter().zip(&heatmap.counts) {
            output.push_str(&format!("{:>row_w$} |", label, row_w = row_w));
            for &count in counts {
                let cell = format!("{}{}", shade(count, max), count);
                output.push_str(&format!(" {:>col_w$}", cell, col_w = col_w));
            }
            output.push('\n');
        }

        output.push_str(&format!("\n{}: 0..{} ({} points)\n", COLORBAR_LABEL, max, heatmap.total));
        Ok(output)
    }
}

fn shade(count: usize, max: usize) -> char {
    if count == 0 || max == 0 {
        return SHADES[0];
    }
    let steps = SHADES.len() - 1;
    let idx = (count * steps).div_ceil(max).clamp(1, steps);
    SHADES[idx]
}
