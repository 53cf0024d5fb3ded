//! JSON heatmap renderer

use crate::error::Result;
use crate::heatmap::{Heatmap, HeatmapRenderer};

/// JSON renderer - outputs the count matrix as pretty-printed JSON
pub struct JsonRenderer;

impl HeatmapRenderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Count matrix as JSON"
    }

    fn content_type(&self) -> &str {
        "application/json"
    }

    fn render(&self, heatmap: &Heatmap) -> Result<String> {
        Ok(serde_json::to_string_pretty(heatmap)?)
    }
}
