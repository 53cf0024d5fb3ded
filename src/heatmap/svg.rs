//! SVG heatmap renderer

use crate::constants::plot::{COLORBAR_LABEL, DPI, TITLE, X_LABEL, Y_LABEL};
use crate::coord::binning::format_degrees;
use crate::error::Result;
use crate::heatmap::colormap::{self, Rgb};
use crate::heatmap::{Heatmap, HeatmapRenderer};

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 130.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 80.0;
const COLORBAR_WIDTH: f64 = 20.0;
const COLORBAR_GAP: f64 = 25.0;
const FONT: &str = "font-family=\"sans-serif\"";

/// SVG renderer - standalone image, sized from the figure inches
pub struct SvgRenderer;

impl HeatmapRenderer for SvgRenderer {
    fn name(&self) -> &str {
        "svg"
    }

    fn description(&self) -> &str {
        "Standalone SVG image"
    }

    fn content_type(&self) -> &str {
        "image/svg+xml"
    }

    fn render(&self, heatmap: &Heatmap) -> Result<String> {
        let width = (heatmap.width * DPI).round();
        let height = (heatmap.height * DPI).round();
        let plot_w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        let cell_w = plot_w / heatmap.cols() as f64;
        let cell_h = plot_h / heatmap.rows() as f64;
        let max = heatmap.max_count();

        let mut svg = String::new();

        // Header
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push('\n');
        svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
        svg.push_str(&format!(
            r#"  <text x="{}" y="{}" text-anchor="middle" font-size="16" {}>{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            MARGIN_TOP / 2.0 + 6.0,
            FONT,
            TITLE
        ));
        svg.push('\n');

        // Cells
        svg.push_str("  <g class=\"cells\">\n");
        for (row, counts) in heatmap.counts.iter().enumerate() {
            for (col, &count) in counts.iter().enumerate() {
                svg.push_str(&format!(
                    r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" data-count="{}"/>"#,
                    MARGIN_LEFT + col as f64 * cell_w,
                    MARGIN_TOP + row as f64 * cell_h,
                    cell_w,
                    cell_h,
                    colormap::for_count(count, max).hex(),
                    count
                ));
                svg.push('\n');
            }
        }
        svg.push_str("  </g>\n");

        // Latitude ticks, north on top
        svg.push_str(&format!("  <g class=\"y-ticks\" font-size=\"11\" {}>\n", FONT));
        for (row, lat) in heatmap.lats.iter().enumerate() {
            svg.push_str(&format!(
                r#"    <text x="{:.2}" y="{:.2}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                MARGIN_LEFT - 6.0,
                MARGIN_TOP + (row as f64 + 0.5) * cell_h,
                format_degrees(*lat)
            ));
            svg.push('\n');
        }
        svg.push_str("  </g>\n");

        // Longitude ticks, rotated so long labels do not collide
        svg.push_str(&format!("  <g class=\"x-ticks\" font-size=\"11\" {}>\n", FONT));
        let tick_y = MARGIN_TOP + plot_h + 8.0;
        for (col, lng) in heatmap.lngs.iter().enumerate() {
            let x = MARGIN_LEFT + (col as f64 + 0.5) * cell_w;
            svg.push_str(&format!(
                r#"    <text x="{x:.2}" y="{tick_y:.2}" text-anchor="end" transform="rotate(-90 {x:.2} {tick_y:.2})" dominant-baseline="middle">{}</text>"#,
                format_degrees(*lng)
            ));
            svg.push('\n');
        }
        svg.push_str("  </g>\n");

        // Axis labels
        svg.push_str(&format!(
            r#"  <text x="{}" y="{}" text-anchor="middle" font-size="13" {}>{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            height - 10.0,
            FONT,
            X_LABEL
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="18" y="{y}" text-anchor="middle" font-size="13" transform="rotate(-90 18 {y})" {}>{}</text>"#,
            FONT,
            Y_LABEL,
            y = MARGIN_TOP + plot_h / 2.0
        ));
        svg.push('\n');

        svg.push_str(&colorbar(MARGIN_LEFT + plot_w + COLORBAR_GAP, plot_h, max));

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

/// Gradient definition, bar, end labels and title for the count scale
fn colorbar(x: f64, plot_h: f64, max: usize) -> String {
    let mut bar = String::new();

    bar.push_str("  <defs>\n");
    bar.push_str("    <linearGradient id=\"ramp\" x1=\"0\" y1=\"1\" x2=\"0\" y2=\"0\">\n");
    for i in 0..=8 {
        let t = i as f64 / 8.0;
        let Rgb { r, g, b } = colormap::evaluate(t);
        bar.push_str(&format!(
            "      <stop offset=\"{:.3}\" stop-color=\"rgb({},{},{})\"/>\n",
            t, r, g, b
        ));
    }
    bar.push_str("    </linearGradient>\n");
    bar.push_str("  </defs>\n");

    bar.push_str(&format!(
        r#"  <rect class="colorbar" x="{:.2}" y="{:.2}" width="{}" height="{:.2}" fill="url(#ramp)"/>"#,
        x, MARGIN_TOP, COLORBAR_WIDTH, plot_h
    ));
    bar.push('\n');

    let label_x = x + COLORBAR_WIDTH + 4.0;
    for (y, label) in [(MARGIN_TOP + plot_h, 0), (MARGIN_TOP, max)] {
        bar.push_str(&format!(
            r#"  <text x="{:.2}" y="{:.2}" font-size="11" dominant-baseline="middle" {}>{}</text>"#,
            label_x, y, FONT, label
        ));
        bar.push('\n');
    }

    let title_x = label_x + 40.0;
    let title_y = MARGIN_TOP + plot_h / 2.0;
    bar.push_str(&format!(
        r#"  <text x="{tx:.2}" y="{ty:.2}" text-anchor="middle" font-size="13" transform="rotate(-90 {tx:.2} {ty:.2})" {}>{}</text>"#,
        FONT,
        COLORBAR_LABEL,
        tx = title_x,
        ty = title_y
    ));
    bar.push('\n');

    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heatmap::{plot, plot_default};

    #[test]
    fn test_svg_structure() {
        let heatmap = plot_default(["49.25_-123.25", "49.26_-123.26"]).unwrap();
        let output = SvgRenderer.render(&heatmap).unwrap();

        assert!(output.starts_with("<svg"));
        assert!(output.trim_end().ends_with("</svg>"));
        assert!(output.contains("Geographic Bin Density Heatmap"));
        assert!(output.contains("Longitude Bins"));
        assert!(output.contains("Latitude Bins"));
        assert!(output.contains("Frequency"));
    }

    #[test]
    fn test_figure_dimensions() {
        let heatmap = plot(["49.25_-123.25"], 15.0, 8.0).unwrap();
        let output = SvgRenderer.render(&heatmap).unwrap();
        assert!(output.contains(r#"width="1500" height="800""#));

        let heatmap = plot_default(["49.25_-123.25"]).unwrap();
        let output = SvgRenderer.render(&heatmap).unwrap();
        assert!(output.contains(r#"width="1000" height="600""#));
    }

    #[test]
    fn test_tick_labels() {
        let heatmap = plot_default(["90.00_180.00", "-90.00_-180.00"]).unwrap();
        let output = SvgRenderer.render(&heatmap).unwrap();

        assert!(output.contains(">90.0</text>"));
        assert!(output.contains(">-90.0</text>"));
        assert!(output.contains(">180.0</text>"));
        assert!(output.contains(">-180.0</text>"));

        // North is drawn above south
        let north = output.find(">90.0</text>").unwrap();
        let south = output.find(">-90.0</text>").unwrap();
        assert!(north < south);
    }

    #[test]
    fn test_cell_counts() {
        let heatmap = plot_default(["50.00_-100.00"; 3]).unwrap();
        let output = SvgRenderer.render(&heatmap).unwrap();

        assert_eq!(output.matches("data-count=").count(), 1);
        assert!(output.contains(r#"data-count="3""#));
        assert!(output.contains("#081d58"));
    }

    #[test]
    fn test_one_element_per_line() {
        let heatmap = plot(["10.0_20.0", "11.0_21.0"], 8.0, 5.0).unwrap();
        let output = SvgRenderer.render(&heatmap).unwrap();

        for line in output.lines() {
            let line = line.trim();
            assert!(line.starts_with('<') && line.ends_with('>'), "bad line: {}", line);
        }
        assert_eq!(output.matches("data-count=").count(), 4);
        assert_eq!(output.matches("<stop ").count(), 9);
        assert!(output.contains(r#"class="colorbar""#));
        assert!(output.ends_with("</svg>\n"));
    }

    #[test]
    fn test_svg_renderer_info() {
        assert_eq!(SvgRenderer.name(), "svg");
        assert_eq!(SvgRenderer.content_type(), "image/svg+xml");
        assert!(!SvgRenderer.description().is_empty());
    }
}
