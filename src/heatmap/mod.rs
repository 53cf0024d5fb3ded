//! Bin density heatmaps
//!
//! Aggregates bin identifiers (as produced by [`crate::coord::binning`])
//! into a count matrix and renders it through trait-based renderers.
//!
//! Rows are distinct latitude floors sorted north to south, columns are
//! distinct longitude floors sorted west to east.

pub mod colormap;
pub mod json;
pub mod svg;
pub mod text;

use crate::constants::plot::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::coord::binning::BinId;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Count matrix of bin identifiers, plus the figure size to draw it at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Latitude floors, descending
    pub lats: Vec<f64>,
    /// Longitude floors, ascending
    pub lngs: Vec<f64>,
    /// Counts per cell [row][col]
    pub counts: Vec<Vec<usize>>,
    /// Number of identifiers aggregated
    pub total: usize,
    /// Figure width in inches
    pub width: f64,
    /// Figure height in inches
    pub height: f64,
}

impl Heatmap {
    /// Build a heatmap from already-parsed bin identifiers
    ///
    /// Fails with [`Error::EmptyInput`] when there is nothing to group.
    pub fn from_bins(bins: &[BinId], width: f64, height: f64) -> Result<Self> {
        for (name, v) in [("width", width), ("height", height)] {
            if !(v > 0.0 && v.is_finite()) {
                return Err(Error::InvalidFigure(format!("{} must be > 0, got {}", name, v)));
            }
        }
        if bins.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut lats: Vec<f64> = bins.iter().map(|b| b.lat).collect();
        lats.sort_by(|a, b| b.total_cmp(a));
        lats.dedup();

        let mut lngs: Vec<f64> = bins.iter().map(|b| b.lng).collect();
        lngs.sort_by(f64::total_cmp);
        lngs.dedup();

        let mut counts = vec![vec![0; lngs.len()]; lats.len()];
        for b in bins {
            if let (Some(row), Some(col)) = (row_of(&lats, b.lat), col_of(&lngs, b.lng)) {
                counts[row][col] += 1;
            }
        }

        tracing::debug!(
            rows = lats.len(),
            cols = lngs.len(),
            total = bins.len(),
            "aggregated heatmap"
        );

        Ok(Self {
            lats,
            lngs,
            counts,
            total: bins.len(),
            width,
            height,
        })
    }

    /// Count for the cell at (lat, lng), 0 if either floor is absent
    pub fn count(&self, lat: f64, lng: f64) -> usize {
        match (row_of(&self.lats, lat + 0.0), col_of(&self.lngs, lng + 0.0)) {
            (Some(row), Some(col)) => self.counts[row][col],
            _ => 0,
        }
    }

    /// Largest cell count
    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn rows(&self) -> usize {
        self.lats.len()
    }

    pub fn cols(&self) -> usize {
        self.lngs.len()
    }
}

fn row_of(lats: &[f64], lat: f64) -> Option<usize> {
    lats.binary_search_by(|l| lat.total_cmp(l)).ok()
}

fn col_of(lngs: &[f64], lng: f64) -> Option<usize> {
    lngs.binary_search_by(|l| l.total_cmp(&lng)).ok()
}

/// Parse bin identifiers and aggregate them
///
/// # Arguments
/// * `ids` - Identifiers formatted as `"<lat>_<lng>"`, one per observation
/// * `width`, `height` - Figure size in inches
///
/// # Errors
/// [`Error::InvalidBin`] for the first malformed identifier,
/// [`Error::EmptyInput`] when `ids` yields nothing.
pub fn plot<I, S>(ids: I, width: f64, height: f64) -> Result<Heatmap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let bins = ids
        .into_iter()
        .map(|id| id.as_ref().parse::<BinId>())
        .collect::<Result<Vec<_>>>()?;
    Heatmap::from_bins(&bins, width, height)
}

/// [`plot`] at the default 10 x 6 inch figure size
pub fn plot_default<I, S>(ids: I) -> Result<Heatmap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    plot(ids, DEFAULT_WIDTH, DEFAULT_HEIGHT)
}

/// Information about a rendering format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for heatmap renderers
pub trait HeatmapRenderer: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// MIME type of the rendered output
    fn content_type(&self) -> &str;

    /// Render the heatmap
    fn render(&self, heatmap: &Heatmap) -> Result<String>;
}

/// Get a renderer by name
pub fn get_renderer(name: &str) -> Option<Box<dyn HeatmapRenderer>> {
    match name.to_lowercase().as_str() {
        "svg" => Some(Box::new(svg::SvgRenderer)),
        "text" => Some(Box::new(text::TextRenderer)),
        "json" => Some(Box::new(json::JsonRenderer)),
        _ => None,
    }
}

/// List all available renderers
pub fn available_formats() -> Vec<FormatInfo> {
    ["svg", "text", "json"]
        .into_iter()
        .filter_map(get_renderer)
        .map(|r| FormatInfo {
            name: r.name().to_string(),
            description: r.description().to_string(),
        })
        .collect()
}
