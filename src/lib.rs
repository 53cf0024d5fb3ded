//! latlong-helper: small geospatial utilities for lat/long coordinates
//!
//! ## Features
//!
//! - Great-circle distance (haversine, mean Earth radius)
//! - Grid binning of coordinates into stable cell identifiers
//! - Density heatmaps of binned coordinates (SVG, text, JSON)
//! - CLI + HTTP API interface
//!
//! ## Quick Start
//!
//! ```rust
//! use latlong_helper::coord::binning::{bin, GridSize};
//! use latlong_helper::coord::distance::haversine_km;
//! use latlong_helper::heatmap::{get_renderer, plot_default};
//!
//! let km = haversine_km(40.7128, -74.0060, 34.0522, -118.2437).unwrap();
//! assert_eq!((km * 100.0).round() / 100.0, 3935.75);
//!
//! let id = bin(49.2593, -123.2475, GridSize::default()).unwrap();
//! assert_eq!(id.to_string(), "49.25_-123.25");
//!
//! let heatmap = plot_default([id.to_string(), id.to_string()]).unwrap();
//! assert_eq!(heatmap.count(49.25, -123.25), 2);
//! let svg = get_renderer("svg").unwrap().render(&heatmap).unwrap();
//! assert!(svg.contains("Geographic Bin Density Heatmap"));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod heatmap;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::binning::{bin, BinId, GridSize};
pub use coord::distance::haversine_km;
pub use coord::Coordinates;
pub use error::{Error, ErrorKind, Result};
pub use heatmap::{plot, Heatmap};
